//! Cell codes and their classification.

/// Code written to a cell when a shot lands in the water.
pub(crate) const MISS: i32 = -99;

/// Base of the sunk encoding: a sunk cell of ship `k` holds `-200 - k`.
pub(crate) const SUNK_BASE: i32 = -200;

/// Identifier of a ship within one player's grid. Small positive integers
/// assigned at placement time. `99` is not a legal id because its hit
/// encoding would collide with the miss code.
pub type ShipId = i32;

/// A single cell of the grid, wrapping the raw signed code.
///
/// The encoding: `0` is untouched water, a positive ship id an intact ship
/// cell, `-99` a miss, any other small negative a hit-but-unsunk ship cell,
/// and anything at or below `-200` a cell of a sunk ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cell(pub(crate) i32);

/// Interpretation of a cell code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellKind {
    /// Untouched water.
    Water,
    /// Untouched cell of the given ship.
    Intact(ShipId),
    /// A shot landed here and missed.
    Miss,
    /// Cell of the given ship, hit but the ship is still afloat.
    Hit(ShipId),
    /// Cell of the given ship, which has been fully sunk.
    Sunk(ShipId),
}

impl Cell {
    /// An untouched water cell.
    pub const WATER: Cell = Cell(0);

    /// The raw signed code of this cell.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Classify the raw code.
    pub fn kind(self) -> CellKind {
        match self.0 {
            0 => CellKind::Water,
            MISS => CellKind::Miss,
            c if c > 0 => CellKind::Intact(c),
            c if c <= SUNK_BASE => CellKind::Sunk(SUNK_BASE - c),
            c => CellKind::Hit(-c),
        }
    }

    /// True for a hit cell of a ship that has not been sunk yet. These are
    /// the cells the hard strategy rescans the grid for.
    pub fn is_open_hit(self) -> bool {
        match self.kind() {
            CellKind::Hit(_) => true,
            _ => false,
        }
    }
}
