//! Core types for backgammon.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Color`] for the two players
//! - [`Point`], [`Source`], and [`Destination`] for board locations
//! - [`Move`] for single-checker moves
//! - [`Dice`] for a roll and the die values still unused this turn
//! - Position notation parsing

mod color;
mod dice;
mod location;
mod mov;
mod notation;

pub use color::Color;
pub use dice::{Dice, DiceError, OpeningRoll};
pub use location::{Destination, Point, Source};
pub use mov::{Move, MoveParseError};
pub use notation::{PositionError, PositionParser};

/// Number of checkers each color owns.
pub const CHECKERS_PER_SIDE: u8 = 15;

/// Number of points on the board.
pub const NUM_POINTS: usize = 24;
