//! Medium difficulty: random fire with a local chase after each hit.

use crate::{
    ai::{random_untried, Sampler, SearchState},
    grid::{Coord, Direction, Grid, ShotOutcome},
};

/// Fire one shot, chasing the neighbors of the last hit when there is one.
///
/// While chasing, the four orthogonal neighbors of the last hit are scanned
/// in the fixed order up, down, left, right, and the first in-bounds untried
/// one is fired at. A hit moves the chase to the new cell (or ends it when
/// the ship sinks); a miss leaves the chase in place, so the next call
/// rescans the same neighbors with the missed one now filtered out by the
/// shot history. When no neighbor qualifies at all, the chase is abandoned
/// and the shot falls through to random search.
pub fn fire_chasing<S: Sampler>(
    target: &mut Grid,
    state: &mut SearchState,
    sampler: &mut S,
) -> Coord {
    if let Some(last) = state.last_hit {
        for &dir in Direction::ALL.iter() {
            let coord = match last.step(dir, target.side()) {
                Some(c) if !state.shots.is_tried(c) => c,
                _ => continue,
            };
            state.shots.mark(coord);
            match target.apply_shot(coord) {
                ShotOutcome::Hit(_) => state.last_hit = Some(coord),
                ShotOutcome::Sunk(_) => state.last_hit = None,
                ShotOutcome::Miss => {}
            }
            return coord;
        }
        // The chase ran out of room around the last hit.
        state.last_hit = None;
    }

    let coord = random_untried(&state.shots, sampler);
    state.shots.mark(coord);
    match target.apply_shot(coord) {
        ShotOutcome::Hit(_) => state.last_hit = Some(coord),
        ShotOutcome::Sunk(_) | ShotOutcome::Miss => {}
    }
    coord
}
