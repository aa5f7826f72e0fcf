//! Built-in move advisors for self-play.

use crate::config::AdvisorKind;
use backgammon_engine::{apply, Board, Color, Dice, Move, MoveAdvisor};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;

/// Creates the advisor for `kind`, seeding any randomness from `seed`.
pub fn build(kind: AdvisorKind, seed: u64) -> Box<dyn MoveAdvisor> {
    match kind {
        AdvisorKind::Random => Box::new(RandomAdvisor::new(seed)),
        AdvisorKind::Race => Box::new(RaceAdvisor),
    }
}

/// Ranks moves in a random order.
pub struct RandomAdvisor {
    rng: ChaCha8Rng,
}

impl RandomAdvisor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveAdvisor for RandomAdvisor {
    fn name(&self) -> &str {
        "random"
    }

    fn rank(&mut self, _board: &Board, _dice: &Dice, _color: Color, candidates: &[Move]) -> Vec<Move> {
        let mut moves = candidates.to_vec();
        moves.shuffle(&mut self.rng);
        moves
    }
}

/// Greedy one-move heuristic: hit, bear off, keep checkers covered, and
/// otherwise make the longest move.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaceAdvisor;

const HIT_BONUS: i32 = 20;
const BEAR_OFF_BONUS: i32 = 15;
const BLOT_PENALTY: i32 = 4;

impl RaceAdvisor {
    /// Scores a single move by the position it leaves behind.
    pub fn score(board: &Board, color: Color, m: Move) -> i32 {
        let after = apply(board, m);
        let opponent = color.opposite();

        let mut score = i32::from(m.die);
        if after.bar(opponent) > board.bar(opponent) {
            score += HIT_BONUS;
        }
        if m.to.is_off() {
            score += BEAR_OFF_BONUS;
        }
        let blots = after
            .occupied_points(color)
            .filter(|&p| after.checkers_at(p, color) == 1)
            .count() as i32;
        score - BLOT_PENALTY * blots
    }
}

impl MoveAdvisor for RaceAdvisor {
    fn name(&self) -> &str {
        "race"
    }

    fn rank(&mut self, board: &Board, _dice: &Dice, color: Color, candidates: &[Move]) -> Vec<Move> {
        let mut moves = candidates.to_vec();
        // Stable, so ties keep generation order.
        moves.sort_by_key(|&m| Reverse(Self::score(board, color, m)));
        moves
    }
}
