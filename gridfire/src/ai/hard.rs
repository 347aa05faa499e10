//! Hard difficulty: anchor-and-direction pursuit with a checkerboard
//! fallback search.

use crate::{
    ai::{random_untried, Sampler, SearchState},
    grid::{Coord, Direction, Grid, ShotOutcome},
};

/// Fire one shot using the three-tier hunting strategy.
///
/// Tier 1 continues an active directional pursuit from the current leading
/// edge. Tier 2 probes the neighbors of the anchor hit, rescanning the
/// whole grid for other open ships when the anchor is boxed in. Tier 3
/// falls back to random fire on the even checkerboard parity. Exactly one
/// shot is fired per call: a tier that yields no shot falls through to the
/// next within the same call.
pub fn fire_hunting<S: Sampler>(
    target: &mut Grid,
    state: &mut SearchState,
    sampler: &mut S,
) -> Coord {
    if let Some(coord) = pursue_direction(target, state) {
        return coord;
    }
    if let Some(coord) = probe_anchor(target, state) {
        return coord;
    }
    checkerboard(target, state, sampler)
}

/// Tier 1: step the active pursuit one cell further.
///
/// A miss abandons the direction: `current` snaps back to the anchor so the
/// next tier can retry the remaining directions from there. An out-of-bounds
/// or already-tried step abandons the direction the same way, but without
/// firing; only a fired shot returns `Some`.
fn pursue_direction(target: &mut Grid, state: &mut SearchState) -> Option<Coord> {
    let dir = state.direction?;
    // A direction is only ever set together with a current cell.
    let lead = state
        .current
        .expect("active pursuit direction without a leading cell");
    match lead.step(dir, target.side()) {
        Some(coord) if !state.shots.is_tried(coord) => {
            state.shots.mark(coord);
            match target.apply_shot(coord) {
                ShotOutcome::Hit(_) => state.current = Some(coord),
                ShotOutcome::Sunk(_) => state.clear_hunt(),
                ShotOutcome::Miss => {
                    state.current = state.anchor;
                    state.direction = None;
                }
            }
            Some(coord)
        }
        _ => {
            state.current = state.anchor;
            state.direction = None;
            None
        }
    }
}

/// Tier 2: probe the four neighbors of the anchor in fixed order. When the
/// anchor is boxed in, some other ship may still be open: rescan every
/// hit-but-unsunk cell of the grid in row-major order and hunt from the
/// first one with an untried neighbor, adopting it as the new anchor.
fn probe_anchor(target: &mut Grid, state: &mut SearchState) -> Option<Coord> {
    let anchor = state.anchor?;
    if let Some(coord) = probe_around(target, state, anchor) {
        return Some(coord);
    }
    let open: Vec<Coord> = target
        .iter_coords()
        .filter(|&c| target[c].is_open_hit())
        .collect();
    for hit in open {
        if let Some(coord) = probe_around(target, state, hit) {
            return Some(coord);
        }
    }
    None
}

/// Fire at the first in-bounds untried neighbor of `hit`, trying directions
/// in fixed order. A hit seeds the pursuit with `hit` as the anchor and the
/// winning direction as the new heading; a miss changes only the grid and
/// the shot history. Returns `None` without firing when no neighbor
/// qualifies.
fn probe_around(target: &mut Grid, state: &mut SearchState, hit: Coord) -> Option<Coord> {
    for &dir in Direction::ALL.iter() {
        let coord = match hit.step(dir, target.side()) {
            Some(c) if !state.shots.is_tried(c) => c,
            _ => continue,
        };
        state.shots.mark(coord);
        match target.apply_shot(coord) {
            ShotOutcome::Hit(_) => {
                state.anchor = Some(hit);
                state.current = Some(coord);
                state.direction = Some(dir);
            }
            ShotOutcome::Sunk(_) => state.clear_hunt(),
            ShotOutcome::Miss => {}
        }
        return Some(coord);
    }
    None
}

/// Tier 3: random fire on the even checkerboard parity.
///
/// Every ship of length two or more covers at least one cell where
/// `(x + y)` is even, so restricting the search pattern to that parity
/// halves the cells that ever need probing. A hit becomes the new anchor,
/// with the direction left for the next call's probe to discover.
fn checkerboard<S: Sampler>(target: &mut Grid, state: &mut SearchState, sampler: &mut S) -> Coord {
    let side = target.side();
    let any_even_open = (0..side)
        .flat_map(|x| (0..side).map(move |y| Coord::new(x, y)))
        .any(|c| c.even_parity() && !state.shots.is_tried(c));
    let coord = if any_even_open {
        loop {
            let c = Coord::new(sampler.sample(side), sampler.sample(side));
            if c.even_parity() && !state.shots.is_tried(c) {
                break c;
            }
        }
    } else {
        // Every even cell is spent. With any ship still afloat this is
        // unreachable, since an open ship always exposes an untried
        // neighbor to tier 2; bound the sampling loop anyway.
        random_untried(&state.shots, sampler)
    };
    state.shots.mark(coord);
    match target.apply_shot(coord) {
        ShotOutcome::Hit(_) => {
            state.anchor = Some(coord);
            state.current = Some(coord);
        }
        ShotOutcome::Sunk(_) | ShotOutcome::Miss => {}
    }
    coord
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        ai::{testing::Script, RngSampler},
        fleet::{try_place_ship, ShipShape},
        grid::Cell,
    };

    /// No scripted values: the test must resolve without random fire.
    fn no_random() -> Script {
        Script::new(&[])
    }

    #[test]
    fn pursuit_miss_resets_to_the_anchor() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(2, 2));
        state.current = Some(Coord::new(2, 3));
        state.direction = Some(Direction::Right);
        state.shots.mark(Coord::new(2, 2));
        state.shots.mark(Coord::new(2, 3));

        // (2,4) is water: the pursuit fires there, misses, and resets.
        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(2, 4));
        assert_eq!(grid[coord].code(), -99);
        assert_eq!(state.current, Some(Coord::new(2, 2)));
        assert_eq!(state.direction, None);
        assert_eq!(state.anchor, Some(Coord::new(2, 2)));
    }

    #[test]
    fn pursuit_hit_advances_the_leading_edge() {
        let mut grid = Grid::new(14);
        try_place_ship(&mut grid, 1, ShipShape::Line(4), Coord::new(2, 2), false).unwrap();
        grid.apply_shot(Coord::new(2, 2));
        grid.apply_shot(Coord::new(2, 3));
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(2, 2));
        state.current = Some(Coord::new(2, 3));
        state.direction = Some(Direction::Right);
        state.shots.mark(Coord::new(2, 2));
        state.shots.mark(Coord::new(2, 3));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(2, 4));
        assert_eq!(state.current, Some(Coord::new(2, 4)));
        assert_eq!(state.direction, Some(Direction::Right));
    }

    #[test]
    fn pursuit_sink_clears_the_hunt() {
        let mut grid = Grid::new(14);
        try_place_ship(&mut grid, 1, ShipShape::Line(3), Coord::new(2, 2), false).unwrap();
        grid.apply_shot(Coord::new(2, 2));
        grid.apply_shot(Coord::new(2, 3));
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(2, 2));
        state.current = Some(Coord::new(2, 3));
        state.direction = Some(Direction::Right);
        state.shots.mark(Coord::new(2, 2));
        state.shots.mark(Coord::new(2, 3));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(2, 4));
        assert!(grid.is_ship_sunk(1));
        assert_eq!(state.anchor, None);
        assert_eq!(state.current, None);
        assert_eq!(state.direction, None);
    }

    #[test]
    fn blocked_pursuit_falls_through_to_the_anchor_probe() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        // Pursuing left from the grid edge: the step is out of bounds, so
        // the same call must fall through and probe around the anchor.
        state.anchor = Some(Coord::new(2, 1));
        state.current = Some(Coord::new(2, 0));
        state.direction = Some(Direction::Left);
        state.shots.mark(Coord::new(2, 1));
        state.shots.mark(Coord::new(2, 0));

        let before = state.shots().fired();
        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        // Up from the anchor is the first untried neighbor.
        assert_eq!(coord, Coord::new(1, 1));
        assert_eq!(state.shots().fired(), before + 1);
        assert_eq!(state.direction, None);
    }

    #[test]
    fn anchor_probe_follows_the_fixed_order() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(5, 5));
        state.current = Some(Coord::new(5, 5));
        state.shots.mark(Coord::new(5, 5));
        // Up is tried, so down must fire next.
        state.shots.mark(Coord::new(4, 5));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(6, 5));
    }

    #[test]
    fn anchor_probe_hit_locks_the_direction() {
        let mut grid = Grid::new(14);
        try_place_ship(&mut grid, 1, ShipShape::Line(3), Coord::new(5, 5), true).unwrap();
        grid.apply_shot(Coord::new(5, 5));
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(5, 5));
        state.current = Some(Coord::new(5, 5));
        state.shots.mark(Coord::new(5, 5));
        state.shots.mark(Coord::new(4, 5));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(6, 5));
        assert_eq!(state.direction, Some(Direction::Down));
        assert_eq!(state.current, Some(Coord::new(6, 5)));
        assert_eq!(state.anchor, Some(Coord::new(5, 5)));
    }

    #[test]
    fn boxed_in_anchor_rescans_for_other_open_ships() {
        let mut grid = Grid::new(14);
        // The anchor at a corner with both neighbors spent.
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(0, 0));
        state.current = Some(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 1));
        state.shots.mark(Coord::new(1, 0));
        grid.set(Coord::new(0, 0), Cell(-1));
        // A second open ship further down the grid.
        try_place_ship(&mut grid, 2, ShipShape::Line(3), Coord::new(7, 4), false).unwrap();
        grid.apply_shot(Coord::new(7, 5));
        state.shots.mark(Coord::new(7, 5));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        // Up from the open hit at (7,5).
        assert_eq!(coord, Coord::new(6, 5));
        // The miss leaves the old anchor in place; only a hit would have
        // adopted (7,5).
        assert_eq!(state.anchor, Some(Coord::new(0, 0)));
    }

    #[test]
    fn rescan_hit_adopts_the_open_cell_as_anchor() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        state.anchor = Some(Coord::new(0, 0));
        state.current = Some(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 1));
        state.shots.mark(Coord::new(1, 0));
        grid.set(Coord::new(0, 0), Cell(-1));
        try_place_ship(&mut grid, 2, ShipShape::Line(3), Coord::new(7, 4), true).unwrap();
        grid.apply_shot(Coord::new(7, 4));
        state.shots.mark(Coord::new(7, 4));
        // Up from (7,4) is water; spend it so the probe fires down into
        // the ship's body.
        state.shots.mark(Coord::new(6, 4));

        let coord = fire_hunting(&mut grid, &mut state, &mut no_random());
        assert_eq!(coord, Coord::new(8, 4));
        assert_eq!(state.anchor, Some(Coord::new(7, 4)));
        assert_eq!(state.current, Some(Coord::new(8, 4)));
        assert_eq!(state.direction, Some(Direction::Down));
    }

    #[test]
    fn exhausted_probe_reaches_the_checkerboard_with_one_shot() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        // One open hit whose whole neighborhood is spent, and one intact
        // cell of the same ship far away keeping it afloat.
        grid.set(Coord::new(0, 0), Cell(-7));
        grid.set(Coord::new(12, 12), Cell(7));
        state.anchor = Some(Coord::new(0, 0));
        state.current = Some(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 0));
        state.shots.mark(Coord::new(0, 1));
        state.shots.mark(Coord::new(1, 0));

        let before = state.shots().fired();
        let mut sampler = Script::new(&[2, 2]);
        let coord = fire_hunting(&mut grid, &mut state, &mut sampler);
        assert_eq!(coord, Coord::new(2, 2));
        assert_eq!(state.shots().fired(), before + 1);
    }

    #[test]
    fn checkerboard_only_selects_even_parity() {
        let mut grid = Grid::new(14);
        let mut state = SearchState::new(14);
        let mut sampler = RngSampler(StdRng::seed_from_u64(3));
        for _ in 0..40 {
            let coord = fire_hunting(&mut grid, &mut state, &mut sampler);
            assert!(coord.even_parity(), "fired at odd parity {:?}", coord);
        }
    }

    #[test]
    fn checkerboard_hit_seeds_the_anchor() {
        let mut grid = Grid::new(14);
        try_place_ship(&mut grid, 1, ShipShape::Line(3), Coord::new(4, 4), false).unwrap();
        let mut state = SearchState::new(14);

        let mut sampler = Script::new(&[4, 4]);
        let coord = fire_hunting(&mut grid, &mut state, &mut sampler);
        assert_eq!(coord, Coord::new(4, 4));
        assert_eq!(state.anchor, Some(Coord::new(4, 4)));
        assert_eq!(state.current, Some(Coord::new(4, 4)));
        assert_eq!(state.direction, None);
    }

    #[test]
    fn spent_parity_falls_back_to_any_untried_cell() {
        let mut grid = Grid::new(2);
        let mut state = SearchState::new(2);
        state.shots.mark(Coord::new(0, 0));
        state.shots.mark(Coord::new(1, 1));

        let mut sampler = Script::new(&[0, 1]);
        let coord = fire_hunting(&mut grid, &mut state, &mut sampler);
        assert_eq!(coord, Coord::new(0, 1));
    }

    #[test]
    fn hunts_a_full_ship_down_from_a_single_hit() {
        let mut grid = Grid::new(14);
        try_place_ship(&mut grid, 1, ShipShape::Line(4), Coord::new(6, 4), false).unwrap();
        let mut state = SearchState::new(14);

        // Checkerboard finds the ship's third cell.
        let mut sampler = Script::new(&[6, 6]);
        fire_hunting(&mut grid, &mut state, &mut sampler);
        // From there the probe and pursuit need no randomness.
        let mut turns = 0;
        while !grid.is_ship_sunk(1) {
            fire_hunting(&mut grid, &mut state, &mut no_random());
            turns += 1;
            assert!(turns < 12, "hunt failed to finish");
        }
        assert_eq!(state.anchor, None);
        assert_eq!(state.direction, None);
        for y in 4..8 {
            assert_eq!(grid[Coord::new(6, y)].code(), -201);
        }
    }
}
