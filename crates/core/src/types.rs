use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

/// Grid coordinate or displacement, depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

impl Add for Pos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { y: self.y + other.y, x: self.x + other.x }
    }
}

impl Sub for Pos {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { y: self.y - other.y, x: self.x - other.x }
    }
}

impl Mul<i32> for Pos {
    type Output = Self;

    fn mul(self, amount: i32) -> Self {
        Self { y: self.y * amount, x: self.x * amount }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    pub const fn normal(self) -> Pos {
        match self {
            Self::Left => Pos { y: 0, x: -1 },
            Self::Up => Pos { y: -1, x: 0 },
            Self::Right => Pos { y: 0, x: 1 },
            Self::Down => Pos { y: 1, x: 0 },
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// The cell `steps` cells away from `from` along this direction.
    pub fn step(self, from: Pos, steps: i32) -> Pos {
        from + self.normal() * steps
    }
}

/// Stored cell state. `OutOfRange` is only ever returned by bounds-checked reads and
/// `Room` only exists while a dungeon is being generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Room,
    OutOfRange,
}

impl Cell {
    /// Carved space, either corridor floor or a room placeholder.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Floor | Self::Room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic_is_component_wise() {
        let a = Pos::new(3, -2);
        let b = Pos::new(1, 5);
        assert_eq!(a + b, Pos::new(4, 3));
        assert_eq!(a - b, Pos::new(2, -7));
        assert_eq!(a * 3, Pos::new(9, -6));
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.normal() + direction.opposite().normal(), Pos::default());
        }
    }

    #[test]
    fn step_walks_along_the_normal() {
        let origin = Pos::new(5, 5);
        assert_eq!(Direction::Left.step(origin, 2), Pos::new(3, 5));
        assert_eq!(Direction::Up.step(origin, 1), Pos::new(5, 4));
        assert_eq!(Direction::Right.step(origin, 3), Pos::new(8, 5));
        assert_eq!(Direction::Down.step(origin, 2), Pos::new(5, 7));
    }
}
