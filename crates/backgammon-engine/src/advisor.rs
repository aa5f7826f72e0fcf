//! Move advisor boundary.
//!
//! An advisor (an external evaluation service, a bot, a human UI) ranks the
//! candidate moves the engine enumerates. The engine never consults an
//! advisor on its own; [`choose_move`] only filters advice down to moves that
//! are legal in the current state.

use crate::game::GameState;
use crate::Board;
use backgammon_core::{Color, Dice, Move};

/// Something that ranks candidate moves, best first.
pub trait MoveAdvisor {
    /// Returns a name for logs and reports.
    fn name(&self) -> &str;

    /// Orders `candidates` from best to worst.
    ///
    /// Implementations may drop candidates or return moves that were not
    /// offered; such moves are ignored by [`choose_move`].
    fn rank(&mut self, board: &Board, dice: &Dice, color: Color, candidates: &[Move]) -> Vec<Move>;
}

impl<A: MoveAdvisor + ?Sized> MoveAdvisor for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rank(&mut self, board: &Board, dice: &Dice, color: Color, candidates: &[Move]) -> Vec<Move> {
        (**self).rank(board, dice, color, candidates)
    }
}

/// Asks `advisor` for a move in `state` and returns the best-ranked legal one.
///
/// Returns `None` if no dice are rolled, there is no legal move, or the
/// advisor ranked no legal move at all.
pub fn choose_move<A: MoveAdvisor + ?Sized>(advisor: &mut A, state: &GameState) -> Option<Move> {
    let dice = state.dice()?;
    let legal = state.legal_moves();
    if legal.is_empty() {
        return None;
    }
    advisor
        .rank(state.board(), dice, state.on_roll(), legal.as_slice())
        .into_iter()
        .find(|m| legal.contains(m))
}

/// Ranks moves in the order the engine generated them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegal;

impl MoveAdvisor for FirstLegal {
    fn name(&self) -> &str {
        "first-legal"
    }

    fn rank(&mut self, _board: &Board, _dice: &Dice, _color: Color, candidates: &[Move]) -> Vec<Move> {
        candidates.to_vec()
    }
}
