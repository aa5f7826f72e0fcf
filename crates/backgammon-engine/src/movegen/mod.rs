//! Move generation.
//!
//! [`legal_moves`] enumerates every single-checker move the player on roll
//! can make with one of the remaining dice. The [`plays`] module builds on it
//! to enumerate complete sequences for the whole roll.

pub mod plays;

use crate::rules::validate;
use crate::Board;
use backgammon_core::{Color, Dice, Move, Source};

/// A duplicate-free list of moves with a fixed maximum capacity.
///
/// A player has at most 15 occupied sources and two distinct die values, so
/// a fixed-size array avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of single moves in any position.
    pub const MAX_MOVES: usize = 32;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move unless it is already present. Returns true if it was added.
    #[inline]
    pub fn insert(&mut self, m: Move) -> bool {
        if self.contains(&m) {
            return false;
        }
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
        true
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut list = MoveList::new();
        for m in iter {
            list.insert(m);
        }
        list
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal single moves for `color` with the remaining `dice`.
///
/// For every distinct remaining die value and every source holding one of
/// the player's checkers (the bar included), the one candidate destination is
/// built and kept if it validates.
pub fn legal_moves(board: &Board, dice: &Dice, color: Color) -> MoveList {
    let mut moves = MoveList::new();

    let bar = (board.bar(color) > 0).then_some(Source::Bar);
    let sources: Vec<Source> = bar
        .into_iter()
        .chain(board.occupied_points(color).map(Source::Point))
        .collect();

    for die in dice.distinct() {
        for &from in &sources {
            let Some(to) = from.target(color, die) else {
                continue;
            };
            let m = Move::new(from, to, color, die);
            if validate(board, dice, color, m).is_ok() {
                moves.insert(m);
            }
        }
    }

    moves
}

/// Returns true if `color` can play at least one of the remaining dice.
pub fn has_legal_move(board: &Board, dice: &Dice, color: Color) -> bool {
    !legal_moves(board, dice, color).is_empty()
}

/// Returns the distinct remaining die values that have at least one legal move,
/// highest first.
pub fn playable_dice(board: &Board, dice: &Dice, color: Color) -> Vec<u8> {
    let moves = legal_moves(board, dice, color);
    dice.distinct()
        .filter(|&die| moves.iter().any(|m| m.die == die))
        .collect()
}
