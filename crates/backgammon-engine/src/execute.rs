//! Move execution.

use crate::Board;
use backgammon_core::{Destination, Move, Source};

/// Applies a validated move, returning the new board.
///
/// Hitting a lone opposing checker sends it to its owner's bar. Bearing off
/// increments the mover's borne-off counter.
///
/// # Panics
///
/// Panics if the source holds no checker of the mover or the destination is
/// blocked. Call [`validate`](crate::rules::validate) first.
pub fn apply(board: &Board, m: Move) -> Board {
    let color = m.player;
    let mut next = *board;

    match m.from {
        Source::Bar => {
            let bar = next.bar_mut(color);
            assert!(*bar > 0, "no {} checker on the bar", color);
            *bar -= 1;
        }
        Source::Point(p) => {
            assert!(
                next.checkers_at(p, color) > 0,
                "no {} checker on point {}",
                color,
                p
            );
            next.points[p.index() as usize] -= color.sign();
        }
    }

    match m.to {
        Destination::Point(p) => {
            let opponent = color.opposite();
            match next.checkers_at(p, opponent) {
                0 => {}
                1 => {
                    next.points[p.index() as usize] = 0;
                    *next.bar_mut(opponent) += 1;
                }
                _ => panic!("point {} is blocked for {}", p, color),
            }
            next.points[p.index() as usize] += color.sign();
        }
        Destination::Off => {
            *next.off_mut(color) += 1;
        }
    }

    next
}
