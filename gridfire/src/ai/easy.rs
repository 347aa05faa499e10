//! Easy difficulty: pure random fire.

use crate::{
    ai::{random_untried, Sampler, SearchState},
    grid::{Coord, Grid},
};

/// Fire at a uniformly random untried cell.
///
/// Reads and writes nothing in the search state beyond the shot history.
/// Over a whole match this degenerates to exhaustive random search.
pub fn fire_random<S: Sampler>(
    target: &mut Grid,
    state: &mut SearchState,
    sampler: &mut S,
) -> Coord {
    let coord = random_untried(&state.shots, sampler);
    state.shots.mark(coord);
    target.apply_shot(coord);
    coord
}
