//! Full-roll play enumeration.
//!
//! A play is the complete sequence of moves a player makes with one roll.
//! Standard rules oblige a player to use as many dice as possible, and when
//! only one die of a non-double roll can be used, the higher one if it can.
//! [`legal_plays`] applies both rules; [`maximal_moves`] lists the single
//! moves that start such a play.

use super::{legal_moves, MoveList};
use crate::execute::apply;
use crate::Board;
use backgammon_core::{Color, Dice, Move};
use std::collections::HashSet;

/// A complete sequence of moves for one roll and the board it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    pub moves: Vec<Move>,
    pub board: Board,
}

impl Play {
    /// Returns the number of dice this play uses.
    #[inline]
    pub fn dice_used(&self) -> usize {
        self.moves.len()
    }

    /// Returns the play in notation, e.g. "8/5(3) 6/5(1)".
    pub fn to_notation(&self) -> String {
        let moves: Vec<String> = self.moves.iter().map(|m| m.to_notation()).collect();
        moves.join(" ")
    }
}

/// Enumerates every play that uses the maximum number of dice.
///
/// Plays that reach the same final board through a different order are
/// reported once. An empty roll or a fully blocked position yields a single
/// empty play.
pub fn legal_plays(board: &Board, dice: &Dice, color: Color) -> Vec<Play> {
    let mut plays = maximal_sequences(board, dice, color);
    let mut seen = HashSet::new();
    plays.retain(|p| seen.insert(p.board));
    plays
}

/// Returns the single moves that begin at least one maximal play.
pub fn maximal_moves(board: &Board, dice: &Dice, color: Color) -> MoveList {
    maximal_sequences(board, dice, color)
        .iter()
        .filter_map(|p| p.moves.first().copied())
        .collect()
}

/// Counts the distinct maximal plays.
pub fn count_plays(board: &Board, dice: &Dice, color: Color) -> usize {
    legal_plays(board, dice, color).len()
}

/// Every move sequence (order preserved) that satisfies the maximal-usage rules.
fn maximal_sequences(board: &Board, dice: &Dice, color: Color) -> Vec<Play> {
    let mut all = Vec::new();
    let mut path = Vec::with_capacity(4);
    collect(board, dice, color, &mut path, &mut all);

    let most = all.iter().map(Play::dice_used).max().unwrap_or(0);
    all.retain(|p| p.dice_used() == most);

    // Only one of two different dice can be played: the higher one if possible.
    if most == 1 && dice.len() == 2 && !dice.is_double() {
        let (a, b) = dice.values();
        let high = a.max(b);
        if all.iter().any(|p| p.moves[0].die == high) {
            all.retain(|p| p.moves[0].die == high);
        }
    }

    all
}

fn collect(board: &Board, dice: &Dice, color: Color, path: &mut Vec<Move>, out: &mut Vec<Play>) {
    let moves = legal_moves(board, dice, color);
    if moves.is_empty() {
        out.push(Play {
            moves: path.clone(),
            board: *board,
        });
        return;
    }

    for &m in &moves {
        let next = apply(board, m);
        let rest = dice
            .consume(m.die)
            .expect("legal_moves only yields available dice");
        path.push(m);
        collect(&next, &rest, color, path, out);
        path.pop();
    }
}
