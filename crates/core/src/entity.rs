//! Map occupants and the player.
//! Entities form a closed set; each variant decides how it blocks sight and movement and how it
//! reacts when the player walks into it.

use log::trace;

use crate::types::{Direction, Pos};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Pos,
    pub sight_radius: f64,
}

impl Player {
    pub fn new(pos: Pos, sight_radius: f64) -> Self {
        Self { pos, sight_radius }
    }

    pub fn step(&mut self, direction: Direction) {
        self.pos = self.pos + direction.normal();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub pos: Pos,
    open: bool,
    opened_on_tick: u64,
}

impl Door {
    /// Doors are always created closed.
    pub fn new(pos: Pos) -> Self {
        Self { pos, open: false, opened_on_tick: 0 }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_transparent(&self) -> bool {
        self.open
    }

    pub fn opened_on_tick(&self) -> u64 {
        self.opened_on_tick
    }

    pub fn open(&mut self, tick: u64) {
        trace!("door at {:?} opened on tick {tick}", self.pos);
        self.open = true;
        self.opened_on_tick = tick;
    }

    pub fn close(&mut self) {
        trace!("door at {:?} closed", self.pos);
        self.open = false;
    }

    /// Closes the door once it has stayed open for `ticks_to_close` ticks.
    pub fn update(&mut self, tick: u64, ticks_to_close: u64) {
        if self.open && tick.saturating_sub(self.opened_on_tick) >= ticks_to_close {
            self.close();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Door(Door),
}

impl Entity {
    pub fn pos(&self) -> Pos {
        match self {
            Self::Door(door) => door.pos,
        }
    }

    pub fn blocks_vision(&self) -> bool {
        match self {
            Self::Door(door) => !door.is_transparent(),
        }
    }

    /// Doors open on contact, so nothing currently stops the player outright.
    pub fn blocks_movement(&self) -> bool {
        match self {
            Self::Door(_) => false,
        }
    }

    pub fn is_interactable(&self) -> bool {
        match self {
            Self::Door(_) => true,
        }
    }

    /// Reaction to the player moving onto this entity's cell.
    pub fn interact(&mut self, tick: u64) {
        match self {
            Self::Door(door) => door.open(tick),
        }
    }

    pub fn update(&mut self, tick: u64, ticks_for_door_to_close: u64) {
        match self {
            Self::Door(door) => door.update(tick, ticks_for_door_to_close),
        }
    }

    pub fn as_door(&self) -> Option<&Door> {
        match self {
            Self::Door(door) => Some(door),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_door_is_closed_and_opaque() {
        let door = Entity::Door(Door::new(Pos::new(3, 4)));
        assert!(door.blocks_vision());
        assert!(!door.blocks_movement());
        assert!(door.is_interactable());
    }

    #[test]
    fn door_closes_after_timeout() {
        let mut door = Door::new(Pos::new(1, 1));
        door.open(10);
        for tick in 10..15 {
            door.update(tick, 5);
            assert!(door.is_open(), "door should still be open on tick {tick}");
        }
        door.update(15, 5);
        assert!(!door.is_open());
    }

    #[test]
    fn reopening_restarts_the_timer() {
        let mut door = Door::new(Pos::new(1, 1));
        door.open(0);
        door.update(3, 5);
        door.open(3);
        door.update(5, 5);
        assert!(door.is_open());
        door.update(8, 5);
        assert!(!door.is_open());
    }

    #[test]
    fn interaction_opens_door_and_makes_it_transparent() {
        let mut entity = Entity::Door(Door::new(Pos::new(2, 2)));
        entity.interact(7);
        assert!(!entity.blocks_vision());
        assert_eq!(entity.as_door().map(Door::opened_on_tick), Some(7));
    }

    #[test]
    fn player_steps_along_direction() {
        let mut player = Player::new(Pos::new(5, 5), 5.5);
        player.step(Direction::Up);
        player.step(Direction::Left);
        assert_eq!(player.pos, Pos::new(4, 4));
    }
}
