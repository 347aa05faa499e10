//! The match host: players, turn order, scoring, and shot dispatch.

use rand::Rng;
use thiserror::Error;

use crate::{
    ai::{Difficulty, Sampler, SearchState},
    fleet::{place_random_fleet, FleetConfig},
    grid::{self, CellKind, Coord, Grid, ShipId},
};

/// Seat at the match. `P1` is the human seat in solo games.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    /// Get the opponent of this seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::P1 => Seat::P2,
            Seat::P2 => Seat::P1,
        }
    }
}

/// One player's side of the match: their grid and running score.
#[derive(Debug, Clone)]
pub struct Player {
    grid: Grid,
    score: i32,
}

impl Player {
    fn new(side: usize) -> Self {
        Self {
            grid: Grid::new(side),
            score: 0,
        }
    }

    /// This player's grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// This player's current score.
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Reason why a shot could not be fired.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The game is already over.
    #[error("the game is already over")]
    AlreadyOver,
    /// It is not the shooting side's turn.
    #[error("attempted to shoot out of turn")]
    OutOfTurn,
    /// The target coordinate is out of bounds for the grid.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,
    /// A shot was already fired at the target cell.
    #[error("the target cell was already shot")]
    AlreadyShot,
}

/// Outcome of a successfully fired shot, as reported to the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// Nothing was hit.
    Miss,
    /// The given ship was hit but not sunk.
    Hit(ShipId),
    /// The given ship was sunk but the target still has ships afloat.
    Sunk(ShipId),
    /// The given ship was sunk and the target has nothing left.
    Victory(ShipId),
}

/// AI opponent occupying seat two of a solo match.
#[derive(Debug, Clone)]
struct AiOpponent {
    difficulty: Difficulty,
    search: SearchState,
}

/// A single match between two seats, with turn order, scoring, and victory
/// detection. Solo matches put an AI opponent in seat two; PvP matches
/// leave both seats to the host.
#[derive(Debug, Clone)]
pub struct Match {
    p1: Player,
    p2: Player,
    ai: Option<AiOpponent>,
    current: Seat,
    winner: Option<Seat>,
}

impl Match {
    /// Set up a solo match against an AI of the given difficulty, placing
    /// both fleets at random. Seat one moves first.
    pub fn solo<R: Rng>(
        side: usize,
        config: &FleetConfig,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        let mut m = Self::bare(side, config, rng);
        m.ai = Some(AiOpponent {
            difficulty,
            search: SearchState::new(side),
        });
        m
    }

    /// Set up a match between two human seats, placing both fleets at
    /// random. Seat one moves first.
    pub fn pvp<R: Rng>(side: usize, config: &FleetConfig, rng: &mut R) -> Self {
        Self::bare(side, config, rng)
    }

    fn bare<R: Rng>(side: usize, config: &FleetConfig, rng: &mut R) -> Self {
        let mut p1 = Player::new(side);
        let mut p2 = Player::new(side);
        place_random_fleet(&mut p1.grid, config, rng);
        place_random_fleet(&mut p2.grid, config, rng);
        Self {
            p1,
            p2,
            ai: None,
            current: Seat::P1,
            winner: None,
        }
    }

    /// The seat whose turn it is.
    pub fn current(&self) -> Seat {
        self.current
    }

    /// The winner, once the match is over.
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Get the player in the given seat.
    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::P1 => &self.p1,
            Seat::P2 => &self.p2,
        }
    }

    fn score_mut(&mut self, seat: Seat) -> &mut i32 {
        match seat {
            Seat::P1 => &mut self.p1.score,
            Seat::P2 => &mut self.p2.score,
        }
    }

    /// Fire a shot for the current seat at the opponent's grid.
    ///
    /// In a solo match only seat one may shoot this way; the AI turn goes
    /// through [`ai_turn`][Match::ai_turn].
    pub fn shoot(&mut self, coord: Coord) -> Result<ShotOutcome, CannotShootReason> {
        if self.winner.is_some() {
            return Err(CannotShootReason::AlreadyOver);
        }
        let shooter = self.current;
        if self.ai.is_some() && shooter == Seat::P2 {
            return Err(CannotShootReason::OutOfTurn);
        }
        let target = shooter.opponent();
        let grid = match target {
            Seat::P1 => &mut self.p1.grid,
            Seat::P2 => &mut self.p2.grid,
        };
        match grid.get(coord).ok_or(CannotShootReason::OutOfBounds)?.kind() {
            CellKind::Water | CellKind::Intact(_) => {}
            _ => return Err(CannotShootReason::AlreadyShot),
        }
        let outcome = grid.apply_shot(coord);
        let wiped = match outcome {
            grid::ShotOutcome::Sunk(_) => grid.all_destroyed(),
            _ => false,
        };
        let out = self.settle(shooter, outcome, wiped);
        self.current = target;
        Ok(out)
    }

    /// Let the AI opponent in seat two take its turn, returning where it
    /// fired and what happened. Panics if the match has no AI opponent.
    pub fn ai_turn<S: Sampler>(
        &mut self,
        sampler: &mut S,
    ) -> Result<(Coord, ShotOutcome), CannotShootReason> {
        if self.winner.is_some() {
            return Err(CannotShootReason::AlreadyOver);
        }
        if self.current != Seat::P2 {
            return Err(CannotShootReason::OutOfTurn);
        }
        let ai = self.ai.as_mut().expect("ai_turn called in a pvp match");
        let grid = &mut self.p1.grid;
        let coord = ai.difficulty.fire(grid, &mut ai.search, sampler);
        // The engine applies its own shot; recover the outcome from the
        // code it left behind.
        let outcome = match grid[coord].kind() {
            CellKind::Miss => grid::ShotOutcome::Miss,
            CellKind::Hit(ship) => grid::ShotOutcome::Hit(ship),
            CellKind::Sunk(ship) => grid::ShotOutcome::Sunk(ship),
            // The engine only ever fires at untried cells.
            _ => unreachable!("engine left an unshot code behind"),
        };
        let wiped = match outcome {
            grid::ShotOutcome::Sunk(_) => grid.all_destroyed(),
            _ => false,
        };
        let out = self.settle(Seat::P2, outcome, wiped);
        self.current = Seat::P1;
        Ok((coord, out))
    }

    /// Update scores and the winner from a raw grid outcome, lifting a
    /// match-ending sink to `Victory`. Scoring: a miss costs the shooter 1;
    /// a hit is +10 / -5; a sink adds +20 / -10 on top; victory adds a
    /// further +100 / -50.
    fn settle(&mut self, shooter: Seat, outcome: grid::ShotOutcome, wiped: bool) -> ShotOutcome {
        let target = shooter.opponent();
        match outcome {
            grid::ShotOutcome::Miss => {
                *self.score_mut(shooter) -= 1;
                ShotOutcome::Miss
            }
            grid::ShotOutcome::Hit(ship) => {
                *self.score_mut(shooter) += 10;
                *self.score_mut(target) -= 5;
                ShotOutcome::Hit(ship)
            }
            grid::ShotOutcome::Sunk(ship) => {
                *self.score_mut(shooter) += 30;
                *self.score_mut(target) -= 15;
                if wiped {
                    *self.score_mut(shooter) += 100;
                    *self.score_mut(target) -= 50;
                    self.winner = Some(shooter);
                    ShotOutcome::Victory(ship)
                } else {
                    ShotOutcome::Sunk(ship)
                }
            }
        }
    }
}
