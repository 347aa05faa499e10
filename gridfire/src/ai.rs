//! The targeting engine: three escalating strategies that each pick one
//! cell of the opponent's grid to attack.
//!
//! Every strategy has the same shape: select one never-before-tried cell,
//! apply the shot to the opponent's grid, update the persistent search
//! state, and report the coordinate fired at. Exactly one shot is fired per
//! call; the host calls one strategy per AI turn, after checking that the
//! match is not already over.
//!
//! [`easy`] fires at random. [`medium`] fires at random but chases the
//! neighbors of its last hit. [`hard`] hunts with an anchor and a pursuit
//! direction, and searches the checkerboard parity when it has no lead.

use rand::Rng;

use crate::grid::{Coord, Direction, Grid};

pub use self::{easy::fire_random, hard::fire_hunting, medium::fire_chasing};

mod easy;
mod hard;
mod medium;

/// AI difficulty, selecting which strategy drives the turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fire one shot at `target` using this difficulty's strategy.
    pub fn fire<S: Sampler>(
        self,
        target: &mut Grid,
        state: &mut SearchState,
        sampler: &mut S,
    ) -> Coord {
        match self {
            Difficulty::Easy => easy::fire_random(target, state, sampler),
            Difficulty::Medium => medium::fire_chasing(target, state, sampler),
            Difficulty::Hard => hard::fire_hunting(target, state, sampler),
        }
    }
}

/// Source of the uniform random integers the strategies use to pick cells.
///
/// [`RngSampler`] adapts any [`rand::Rng`]; tests substitute scripted
/// samplers for reproducible shot sequences.
pub trait Sampler {
    /// Produce a uniformly distributed integer in `[0, bound)`.
    fn sample(&mut self, bound: usize) -> usize;
}

/// Adapter exposing a [`rand::Rng`] as a [`Sampler`].
pub struct RngSampler<R>(pub R);

impl<R: Rng> Sampler for RngSampler<R> {
    fn sample(&mut self, bound: usize) -> usize {
        self.0.gen_range(0, bound)
    }
}

/// The attacking side's memory of which cells it has already fired at.
/// Entries only ever go from untried to tried, never back.
#[derive(Debug, Clone)]
pub struct ShotHistory {
    side: usize,
    tried: Box<[bool]>,
    fired: usize,
}

impl ShotHistory {
    /// Create an all-untried history for a grid of the given side.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            tried: vec![false; side * side].into_boxed_slice(),
            fired: 0,
        }
    }

    /// Side length of the tracked grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether a shot has already been fired at `coord`.
    /// Panics if the coordinate is out of bounds.
    pub fn is_tried(&self, coord: Coord) -> bool {
        assert!(
            coord.x < self.side && coord.y < self.side,
            "coordinate out of bounds"
        );
        self.tried[coord.x * self.side + coord.y]
    }

    /// Record a shot fired at `coord`.
    pub(crate) fn mark(&mut self, coord: Coord) {
        let slot = &mut self.tried[coord.x * self.side + coord.y];
        if !*slot {
            *slot = true;
            self.fired += 1;
        }
    }

    /// Number of cells fired at so far.
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Number of cells not yet fired at.
    pub fn remaining(&self) -> usize {
        self.side * self.side - self.fired
    }
}

/// Persistent search state of one AI opponent, living for a single match.
///
/// A ship under hunt is identified implicitly by grid content (hit cells
/// whose ship is not yet sunk), never by a stored ship id; the hard
/// strategy's grid rescan relies on this when more than one ship is open
/// at once.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Last cell that registered a hit; drives the medium chase.
    pub(crate) last_hit: Option<Coord>,
    /// First confirmed hit of the ship currently being hunted (hard).
    pub(crate) anchor: Option<Coord>,
    /// Leading edge of the active directional pursuit (hard).
    pub(crate) current: Option<Coord>,
    /// Active pursuit direction (hard). `None` means no direction.
    pub(crate) direction: Option<Direction>,
    /// Cells this AI has already fired at.
    pub(crate) shots: ShotHistory,
}

impl SearchState {
    /// Fresh state for a match on a grid of the given side: no chase, no
    /// hunt, nothing fired.
    pub fn new(side: usize) -> Self {
        Self {
            last_hit: None,
            anchor: None,
            current: None,
            direction: None,
            shots: ShotHistory::new(side),
        }
    }

    /// The cells fired at so far.
    pub fn shots(&self) -> &ShotHistory {
        &self.shots
    }

    /// Forget the ship currently being hunted.
    pub(crate) fn clear_hunt(&mut self) {
        self.anchor = None;
        self.current = None;
        self.direction = None;
    }
}

/// Rejection-sample an untried cell.
///
/// Panics if no untried cell remains: the host should have ended the match
/// via `all_destroyed` long before the board could fill, so being called on
/// a full board is a contract violation, not a condition to retry.
fn random_untried<S: Sampler>(shots: &ShotHistory, sampler: &mut S) -> Coord {
    assert!(shots.remaining() > 0, "no untried cell remains on the board");
    loop {
        let coord = Coord::new(sampler.sample(shots.side()), sampler.sample(shots.side()));
        if !shots.is_tried(coord) {
            return coord;
        }
    }
}
