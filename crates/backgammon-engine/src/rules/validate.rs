//! Single-move validation.

use super::MoveError;
use crate::Board;
use backgammon_core::{Color, Destination, Dice, Move, Source};

/// Checks whether `m` is legal for `on_roll` on `board` with `dice`.
///
/// Checks run in a fixed order and stop at the first failure:
/// ownership of the move, die availability, the bar-first rule, a checker at
/// the source, reachability (including bear-off eligibility), and finally
/// whether the destination is blocked.
pub fn validate(board: &Board, dice: &Dice, on_roll: Color, m: Move) -> Result<(), MoveError> {
    if m.player != on_roll {
        return Err(MoveError::WrongPlayer {
            expected: on_roll,
            got: m.player,
        });
    }

    if !dice.contains(m.die) {
        return Err(MoveError::DieNotAvailable(m.die));
    }

    if board.bar(on_roll) > 0 && m.from != Source::Bar {
        return Err(MoveError::MustEnterFromBarFirst);
    }

    let has_piece = match m.from {
        Source::Bar => board.bar(on_roll) > 0,
        Source::Point(p) => board.checkers_at(p, on_roll) > 0,
    };
    if !has_piece {
        return Err(MoveError::NoPieceAtSource);
    }

    match m.to {
        Destination::Point(to) => {
            if m.from.target(on_roll, m.die) != Some(m.to) {
                return Err(MoveError::WrongDistance { to: m.to, die: m.die });
            }
            if board.is_blocked_for(to, on_roll) {
                return Err(MoveError::BlockedPoint(to));
            }
        }
        Destination::Off => {
            if !board.all_home(on_roll) {
                return Err(MoveError::NotAllCheckersHome);
            }
            // all_home implies an empty bar, so the source is a point here.
            let from = m.from.point().ok_or(MoveError::NotAllCheckersHome)?;
            let needed = from.distance_to_off(on_roll);
            let exact = m.die == needed;
            let overshoot = m.die > needed && board.farthest_checker(on_roll) == Some(from);
            if !exact && !overshoot {
                return Err(MoveError::WrongDistance { to: m.to, die: m.die });
            }
        }
    }

    Ok(())
}
