//! Coordinates and directions on the combat grid.

/// Position of a cell in a [`Grid`][crate::grid::Grid].
///
/// `x` selects the row and `y` the column, so [`Direction::Up`] and
/// [`Direction::Down`] move along `x` while [`Direction::Left`] and
/// [`Direction::Right`] move along `y`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coord {
    /// Row of the cell.
    pub x: usize,
    /// Column of the cell.
    pub y: usize,
}

impl Coord {
    /// Construct a [`Coord`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step one cell in `dir`, staying within a square grid of the given
    /// side. Returns `None` when the step would leave the grid.
    pub fn step(self, dir: Direction, side: usize) -> Option<Coord> {
        match dir {
            Direction::Up => self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
            Direction::Down => match self.x + 1 {
                x if x < side => Some(Coord::new(x, self.y)),
                _ => None,
            },
            Direction::Left => self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
            Direction::Right => match self.y + 1 {
                y if y < side => Some(Coord::new(self.x, y)),
                _ => None,
            },
        }
    }

    /// Whether the cell sits on the even checkerboard parity.
    pub fn even_parity(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl From<(usize, usize)> for Coord {
    /// Construct a [`Coord`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for (usize, usize) {
    /// Convert the [`Coord`] into an `(x, y)` pair.
    fn from(coord: Coord) -> Self {
        (coord.x, coord.y)
    }
}

/// Direction of travel between grid cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in their fixed scan order. The chase and pursuit
    /// strategies try neighbors in exactly this order, which is what makes
    /// their tie-breaking deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}
