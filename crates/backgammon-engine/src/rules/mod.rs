//! Move legality.
//!
//! [`validate`] decides whether a single checker move is legal for the
//! player on roll, and if not, exactly why. Every rejection reason is a
//! distinct [`MoveError`] variant so callers can report it precisely.

mod validate;

pub use validate::validate;

use backgammon_core::{Color, Destination, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a move was rejected.
///
/// All variants are expected, recoverable outcomes of validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("move belongs to {got}, but {expected} is on roll")]
    WrongPlayer { expected: Color, got: Color },

    #[error("die {0} is not available")]
    DieNotAvailable(u8),

    #[error("a checker on the bar must enter first")]
    MustEnterFromBarFirst,

    #[error("no checker of the player on roll at the source")]
    NoPieceAtSource,

    #[error("destination {to} is not reachable with a {die}")]
    WrongDistance { to: Destination, die: u8 },

    #[error("cannot bear off until all checkers are home")]
    NotAllCheckersHome,

    #[error("point {0} is blocked")]
    BlockedPoint(Point),

    #[error("the move does not lead to a play using the maximum number of dice")]
    DiceNotMaximized,
}

/// How many dice a player is obliged to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceRule {
    /// Each move is judged on its own; a turn ends when no remaining die can
    /// be played.
    #[default]
    PerDie,
    /// Moves must be the first step of a play that uses as many dice as
    /// possible (and the higher die when only one of two can be used).
    Maximal,
}
