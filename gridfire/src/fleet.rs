//! Ship shapes, fleet configuration, and placement.

use rand::Rng;
use thiserror::Error;

use crate::grid::{Cell, Coord, Grid, ShipId};

/// Footprint of a ship on the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShipShape {
    /// A straight run of the given length.
    Line(usize),
    /// A rectangular block, `long` cells by `short` cells.
    Block { long: usize, short: usize },
}

impl ShipShape {
    /// Number of cells the ship occupies.
    pub fn cells(self) -> usize {
        match self {
            ShipShape::Line(len) => len,
            ShipShape::Block { long, short } => long * short,
        }
    }

    /// Footprint as `(height, width)` for the given orientation.
    fn extent(self, vertical: bool) -> (usize, usize) {
        match self {
            ShipShape::Line(len) => {
                if vertical {
                    (len, 1)
                } else {
                    (1, len)
                }
            }
            ShipShape::Block { long, short } => {
                if vertical {
                    (long, short)
                } else {
                    (short, long)
                }
            }
        }
    }
}

/// Ship roster for one player's grid. Ids are assigned from the roster
/// order at placement time, starting at 1.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    shapes: Vec<ShipShape>,
}

impl FleetConfig {
    /// Create a fleet from the given roster of shapes.
    pub fn new(shapes: Vec<ShipShape>) -> Self {
        Self { shapes }
    }

    /// The shapes in this fleet, in id order.
    pub fn shapes(&self) -> &[ShipShape] {
        &self.shapes
    }
}

impl Default for FleetConfig {
    /// The standard six-ship fleet: lines of length 3, 4, 4, 5 and 6, plus
    /// one 5x2 block.
    fn default() -> Self {
        Self::new(vec![
            ShipShape::Line(3),
            ShipShape::Line(4),
            ShipShape::Line(4),
            ShipShape::Line(5),
            ShipShape::Line(6),
            ShipShape::Block { long: 5, short: 2 },
        ])
    }
}

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The footprint does not fit on the grid at the given position.
    #[error("insufficient space for the ship at the specified position")]
    InsufficientSpace,
    /// The footprint or its one-cell margin touches another ship.
    #[error("the specified position was already occupied")]
    AlreadyOccupied,
    /// The id is outside `1..=199`, or is `99`, which the grid encoding
    /// reserves for the miss code.
    #[error("invalid ship id {0}")]
    InvalidId(ShipId),
}

/// Try to place a ship of the given shape with its top-left corner at `at`.
///
/// Ships never touch, not even diagonally: placement requires the footprint
/// plus a one-cell margin to be free of other ships.
pub fn try_place_ship(
    grid: &mut Grid,
    ship: ShipId,
    shape: ShipShape,
    at: Coord,
    vertical: bool,
) -> Result<(), CannotPlaceReason> {
    if ship <= 0 || ship > 199 || ship == 99 {
        return Err(CannotPlaceReason::InvalidId(ship));
    }
    let (height, width) = shape.extent(vertical);
    if at.x + height > grid.side() || at.y + width > grid.side() {
        return Err(CannotPlaceReason::InsufficientSpace);
    }
    if !is_area_free(grid, at, height, width) {
        return Err(CannotPlaceReason::AlreadyOccupied);
    }
    for i in 0..height {
        for j in 0..width {
            grid.set(Coord::new(at.x + i, at.y + j), Cell(ship));
        }
    }
    Ok(())
}

/// Place every ship of the fleet at a random position and orientation,
/// assigning ids 1, 2, ... in roster order. Retries each ship until a valid
/// position is found; the default fleet always fits on the default grid.
pub fn place_random_fleet<R: Rng>(grid: &mut Grid, config: &FleetConfig, rng: &mut R) {
    for (idx, &shape) in config.shapes().iter().enumerate() {
        let ship = (idx + 1) as ShipId;
        loop {
            let vertical = rng.gen();
            let (height, width) = shape.extent(vertical);
            assert!(
                height <= grid.side() && width <= grid.side(),
                "ship {:?} does not fit on a grid of side {}",
                shape,
                grid.side()
            );
            let at = Coord::new(
                rng.gen_range(0, grid.side() - height + 1),
                rng.gen_range(0, grid.side() - width + 1),
            );
            if try_place_ship(grid, ship, shape, at, vertical).is_ok() {
                break;
            }
        }
    }
}

/// Check that the `height` x `width` area at `at`, extended by one cell in
/// every direction, holds no ship. Cells past the grid edge are ignored.
fn is_area_free(grid: &Grid, at: Coord, height: usize, width: usize) -> bool {
    for i in at.x.saturating_sub(1)..=at.x + height {
        for j in at.y.saturating_sub(1)..=at.y + width {
            if i >= grid.side() || j >= grid.side() {
                continue;
            }
            if grid[Coord::new(i, j)] != Cell::WATER {
                return false;
            }
        }
    }
    true
}
