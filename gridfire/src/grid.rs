//! The combat grid and the primitive queries the targeting engine builds on.

use std::ops::Index;

pub use self::{
    cell::{Cell, CellKind, ShipId},
    coord::{Coord, Direction},
};

mod cell;
mod coord;

/// Default side length of the combat grid.
pub const DEFAULT_SIDE: usize = 14;

/// Outcome of a shot applied to the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// Water; the cell now holds the miss code.
    Miss,
    /// The given ship was hit but still has intact cells.
    Hit(ShipId),
    /// The given ship was hit and its last intact cell is gone. All of its
    /// cells now hold the sunk code.
    Sunk(ShipId),
}

/// One player's square grid of cell codes.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Side length of the square.
    side: usize,
    /// Cells in row-major order.
    cells: Box<[Cell]>,
}

impl Grid {
    /// Create an all-water grid of the given side.
    /// Panics if `side` is 0.
    pub fn new(side: usize) -> Self {
        assert!(side > 0, "grid side must be nonzero");
        Self {
            side,
            cells: vec![Cell::WATER; side * side].into_boxed_slice(),
        }
    }

    /// Side length of the grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Convert a coordinate to an index into the cell slice.
    /// Returns `None` if the coordinate is out of bounds.
    fn linearize(&self, coord: Coord) -> Option<usize> {
        if coord.x < self.side && coord.y < self.side {
            Some(coord.x * self.side + coord.y)
        } else {
            None
        }
    }

    /// Get the cell at the given coordinate, or `None` if out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.linearize(coord).map(|i| self.cells[i])
    }

    /// Overwrite the cell at the given coordinate.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        let i = self
            .linearize(coord)
            .expect("coordinate out of bounds");
        self.cells[i] = cell;
    }

    /// Iterate all coordinates of the grid in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord> {
        let side = self.side;
        (0..side).flat_map(move |x| (0..side).map(move |y| Coord::new(x, y)))
    }

    /// True iff no intact cell of `ship` remains. Only intact cells count:
    /// cells already hit do not keep a ship afloat.
    pub fn is_ship_sunk(&self, ship: ShipId) -> bool {
        self.cells.iter().all(|c| c.0 != ship)
    }

    /// Convert every hit cell of `ship` to its sunk code. Called right after
    /// [`is_ship_sunk`][Grid::is_ship_sunk] turns true, so hit cells of a
    /// dead ship never persist past the turn in which it died.
    pub fn mark_ship_sunk(&mut self, ship: ShipId) {
        for c in self.cells.iter_mut() {
            if c.0 == -ship {
                c.0 = cell::SUNK_BASE - ship;
            }
        }
    }

    /// Match-over predicate for this side: no intact ship cell anywhere.
    pub fn all_destroyed(&self) -> bool {
        self.cells.iter().all(|c| c.0 <= 0)
    }

    /// Apply one shot to an untried cell and report the outcome. A hit
    /// flips the cell's sign; a miss writes the miss code. When the hit was
    /// the ship's last intact cell, every cell of the ship converts to the
    /// sunk code before this returns.
    ///
    /// Panics if the coordinate is out of bounds or the cell was already
    /// shot; callers consult bounds and their shot history first.
    pub fn apply_shot(&mut self, coord: Coord) -> ShotOutcome {
        let i = self
            .linearize(coord)
            .expect("coordinate out of bounds");
        match self.cells[i].kind() {
            CellKind::Intact(ship) => {
                self.cells[i] = Cell(-ship);
                if self.is_ship_sunk(ship) {
                    self.mark_ship_sunk(ship);
                    ShotOutcome::Sunk(ship)
                } else {
                    ShotOutcome::Hit(ship)
                }
            }
            CellKind::Water => {
                self.cells[i] = Cell(cell::MISS);
                ShotOutcome::Miss
            }
            _ => panic!("cell {:?} was already shot", coord),
        }
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        let i = self
            .linearize(coord)
            .expect("coordinate out of bounds");
        &self.cells[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Place a horizontal run of `len` cells of `ship` starting at `start`.
    fn lay_ship(grid: &mut Grid, ship: ShipId, start: Coord, len: usize) {
        for i in 0..len {
            grid.set(Coord::new(start.x, start.y + i), Cell(ship));
        }
    }

    #[test]
    fn miss_writes_miss_code() {
        let mut grid = Grid::new(14);
        assert_eq!(grid.apply_shot(Coord::new(3, 3)), ShotOutcome::Miss);
        assert_eq!(grid[Coord::new(3, 3)].code(), -99);
    }

    #[test]
    fn hit_negates_the_cell() {
        let mut grid = Grid::new(14);
        lay_ship(&mut grid, 2, Coord::new(5, 3), 3);
        assert_eq!(grid.apply_shot(Coord::new(5, 3)), ShotOutcome::Hit(2));
        assert_eq!(grid[Coord::new(5, 3)].code(), -2);
        // The rest of the ship is untouched.
        assert_eq!(grid[Coord::new(5, 4)].code(), 2);
        assert_eq!(grid[Coord::new(5, 5)].code(), 2);
    }

    #[test]
    fn sinking_converts_all_cells_atomically() {
        let mut grid = Grid::new(14);
        lay_ship(&mut grid, 2, Coord::new(5, 3), 3);
        assert_eq!(grid.apply_shot(Coord::new(5, 3)), ShotOutcome::Hit(2));
        assert_eq!(grid.apply_shot(Coord::new(5, 4)), ShotOutcome::Hit(2));
        assert_eq!(grid.apply_shot(Coord::new(5, 5)), ShotOutcome::Sunk(2));
        for y in 3..6 {
            assert_eq!(grid[Coord::new(5, y)].code(), -202);
        }
    }

    #[test]
    fn sunk_detection_ignores_hit_cells() {
        let mut grid = Grid::new(14);
        lay_ship(&mut grid, 1, Coord::new(0, 0), 2);
        grid.apply_shot(Coord::new(0, 0));
        // One cell hit, one intact: not sunk.
        assert!(!grid.is_ship_sunk(1));
        grid.apply_shot(Coord::new(0, 1));
        assert!(grid.is_ship_sunk(1));
    }

    #[test]
    fn all_destroyed_requires_every_ship_gone() {
        let mut grid = Grid::new(14);
        assert!(grid.all_destroyed());
        lay_ship(&mut grid, 1, Coord::new(0, 0), 2);
        lay_ship(&mut grid, 2, Coord::new(7, 7), 2);
        grid.apply_shot(Coord::new(0, 0));
        grid.apply_shot(Coord::new(0, 1));
        assert!(!grid.all_destroyed());
        grid.apply_shot(Coord::new(7, 7));
        grid.apply_shot(Coord::new(7, 8));
        assert!(grid.all_destroyed());
    }

    #[test]
    #[should_panic(expected = "already shot")]
    fn refiring_a_cell_panics() {
        let mut grid = Grid::new(14);
        grid.apply_shot(Coord::new(1, 1));
        grid.apply_shot(Coord::new(1, 1));
    }
}
