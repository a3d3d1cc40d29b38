//! Bounds-checked cell storage shared by every generation phase and by visibility.

use crate::types::{Cell, Direction, Pos};

/// Smallest extent that still fits the maze entrance and the room border margin.
pub const MIN_DIMENSION: usize = 7;

/// Largest extent accepted; keeps coordinates well inside `i32` and the cell buffer modest.
pub const MAX_DIMENSION: usize = 4_095;

/// Forces an extent odd (even values lose one cell) and into
/// [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
pub fn normalize_dimension(value: usize) -> usize {
    let odd = if value % 2 == 0 { value.saturating_sub(1) } else { value };
    odd.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds an all-wall grid with odd dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let width = normalize_dimension(width);
        let height = normalize_dimension(height);
        Self { width, height, cells: vec![Cell::Wall; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: Pos) -> Cell {
        if !self.in_bounds(pos) {
            return Cell::OutOfRange;
        }
        self.cells[self.index(pos)]
    }

    /// Writes are dropped outside the grid. `OutOfRange` is never stored.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if !self.in_bounds(pos) || cell == Cell::OutOfRange {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.get(pos).is_open()
    }

    pub fn open_neighbor_count(&self, pos: Pos) -> usize {
        Direction::ALL.iter().filter(|direction| self.is_open(direction.step(pos, 1))).count()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&stored| stored == cell).count()
    }

    /// Every coordinate in column-major order (x outer, y inner).
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.width as i32)
            .flat_map(move |x| (0..self.height as i32).map(move |y| Pos { y, x }))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_dimensions_are_forced_odd() {
        let grid = Grid::new(56, 30);
        assert_eq!((grid.width(), grid.height()), (55, 29));

        let grid = Grid::new(25, 25);
        assert_eq!((grid.width(), grid.height()), (25, 25));
    }

    #[test]
    fn tiny_dimensions_are_clamped_to_minimum() {
        let grid = Grid::new(0, 2);
        assert_eq!((grid.width(), grid.height()), (MIN_DIMENSION, MIN_DIMENSION));
    }

    #[test]
    fn huge_dimensions_are_clamped_to_maximum() {
        assert_eq!(normalize_dimension(usize::MAX), MAX_DIMENSION);
        assert_eq!(normalize_dimension(MAX_DIMENSION + 1), MAX_DIMENSION);
        assert_eq!(MAX_DIMENSION % 2, 1);
    }

    #[test]
    fn out_of_range_reads_return_sentinel_and_writes_are_ignored() {
        let mut grid = Grid::new(9, 9);
        assert_eq!(grid.get(Pos::new(-1, 0)), Cell::OutOfRange);
        assert_eq!(grid.get(Pos::new(0, 9)), Cell::OutOfRange);
        assert!(!grid.is_open(Pos::new(100, 100)));

        grid.set(Pos::new(9, 0), Cell::Floor);
        assert_eq!(grid.count(Cell::Floor), 0);
    }

    #[test]
    fn out_of_range_is_never_stored() {
        let mut grid = Grid::new(9, 9);
        grid.set(Pos::new(1, 1), Cell::OutOfRange);
        assert_eq!(grid.get(Pos::new(1, 1)), Cell::Wall);
    }

    #[test]
    fn open_neighbors_count_floor_and_room_cells() {
        let mut grid = Grid::new(9, 9);
        let center = Pos::new(4, 4);
        grid.set(Pos::new(3, 4), Cell::Floor);
        grid.set(Pos::new(4, 3), Cell::Room);
        assert_eq!(grid.open_neighbor_count(center), 2);
    }

    #[test]
    fn positions_cover_the_whole_grid_once() {
        let grid = Grid::new(7, 9);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions.len(), 63);
        assert_eq!(positions[0], Pos::new(0, 0));
        assert_eq!(positions[1], Pos::new(0, 1));
    }
}
