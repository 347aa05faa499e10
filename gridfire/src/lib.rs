//! Implementation of the classic game Battleship, built around a targeting
//! engine with three escalating AI strategies.
//!
//! [`grid`] defines the shared combat-grid representation and the primitive
//! queries over it: cell codes, sink detection, and the match-over check.
//!
//! [`fleet`] defines ship shapes and placement, including the random
//! placement used to set up a match.
//!
//! [`ai`] is the targeting engine: given the opponent's grid and a
//! persistent search state, each strategy picks one untried cell per turn,
//! fires, and updates its state. The easy strategy fires at random, the
//! medium one chases the neighbors of its last hit, and the hard one hunts
//! directionally from an anchor with a checkerboard search as fallback.
//!
//! [`game`] ties both sides together into a match with turn order, scoring,
//! and victory detection.

pub mod ai;
pub mod fleet;
pub mod game;
pub mod grid;
