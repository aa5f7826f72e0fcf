//! Game execution loop for self-play.
//!
//! [`GameRunner`] drives complete games through the engine. Every transition
//! is loaded from and saved back to a [`GameStore`], so the runner exercises
//! the same load-transition-save cycle a service would.

use crate::advisors;
use crate::config::SelfPlayConfig;
use backgammon_engine::store::update;
use backgammon_engine::{
    choose_move, Color, DiceRule, GameState, GameStore, MoveAdvisor, StoreError,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Save attempts per transition before giving up on a version conflict.
const SAVE_ATTEMPTS: usize = 3;

/// Errors that can occur while running a game.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The advisor returned no legal move although the engine offered some.
    #[error("advisor {advisor} chose no legal move for {color}")]
    NoMoveChosen { advisor: String, color: Color },
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    /// The turn limit was reached first.
    Abandoned,
}

impl Outcome {
    fn from_winner(winner: Option<Color>) -> Self {
        match winner {
            Some(Color::White) => Outcome::WhiteWins,
            Some(Color::Black) => Outcome::BlackWins,
            None => Outcome::Abandoned,
        }
    }
}

/// The record of one finished or abandoned game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub id: String,
    pub outcome: Outcome,
    pub turns: u32,
    /// Moves in play order, in `from/to(die)` notation.
    pub moves: Vec<String>,
    /// Dice that could not be played, summed over all turns.
    pub forfeited_dice: usize,
    pub white_pips: u32,
    pub black_pips: u32,
    /// Final store version of the game.
    pub version: u64,
}

/// Totals over a series of games.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub white: String,
    pub black: String,
    pub games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub abandoned: u32,
    pub total_turns: u64,
}

impl MatchSummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_turns += u64::from(game.turns);
        match game.outcome {
            Outcome::WhiteWins => self.white_wins += 1,
            Outcome::BlackWins => self.black_wins += 1,
            Outcome::Abandoned => self.abandoned += 1,
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / f64::from(self.games)
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (white) vs {} (black)", self.white, self.black)?;
        writeln!(f, "  games:     {}", self.games)?;
        writeln!(f, "  white won: {}", self.white_wins)?;
        writeln!(f, "  black won: {}", self.black_wins)?;
        writeln!(f, "  abandoned: {}", self.abandoned)?;
        write!(f, "  avg turns: {:.1}", self.average_turns())
    }
}

/// Plays games between two advisors.
pub struct GameRunner<S: GameStore> {
    store: S,
    white: Box<dyn MoveAdvisor>,
    black: Box<dyn MoveAdvisor>,
    rng: ChaCha8Rng,
    dice_rule: DiceRule,
    max_turns: u32,
}

impl<S: GameStore> GameRunner<S> {
    pub fn new(
        store: S,
        white: Box<dyn MoveAdvisor>,
        black: Box<dyn MoveAdvisor>,
        seed: u64,
        dice_rule: DiceRule,
        max_turns: u32,
    ) -> Self {
        Self {
            store,
            white,
            black,
            rng: ChaCha8Rng::seed_from_u64(seed),
            dice_rule,
            max_turns,
        }
    }

    /// Builds a runner from configuration. Advisors get seeds derived from
    /// the dice seed so a whole run is reproducible from one number.
    pub fn from_config(store: S, config: &SelfPlayConfig) -> Self {
        let white = advisors::build(config.advisor.white, config.seed.wrapping_add(1));
        let black = advisors::build(config.advisor.black, config.seed.wrapping_add(2));
        Self::new(store, white, black, config.seed, config.dice_rule, config.max_turns)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plays `games` games and returns the per-game records with their totals.
    pub fn play_match(&mut self, games: u32) -> Result<(Vec<GameRecord>, MatchSummary), RunError> {
        let mut summary = MatchSummary {
            white: self.white.name().to_string(),
            black: self.black.name().to_string(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(games as usize);
        for _ in 0..games {
            let record = self.play_game()?;
            summary.record(&record);
            records.push(record);
        }
        Ok((records, summary))
    }

    /// Plays one game from the opening roll until it finishes or the turn
    /// limit is reached.
    pub fn play_game(&mut self) -> Result<GameRecord, RunError> {
        let id = self.store.create(GameState::with_rule(self.dice_rule))?;
        let rng = &mut self.rng;
        let mut snapshot = update(&mut self.store, &id, SAVE_ATTEMPTS, |s| {
            s.start_with_opening_roll(&mut *rng)
        })?;
        info!(id = %id, first = %snapshot.state.on_roll(), "game started");

        let mut moves = Vec::new();
        let mut forfeited_dice = 0;
        loop {
            let state = &snapshot.state;
            if state.is_finished() {
                break;
            }

            if state.awaiting_roll() {
                forfeited_dice += state.forfeited().len();
                if state.turn() >= self.max_turns {
                    warn!(id = %id, turns = state.turn(), "turn limit reached, abandoning game");
                    break;
                }
                let rng = &mut self.rng;
                snapshot = update(&mut self.store, &id, SAVE_ATTEMPTS, |s| s.start_turn(&mut *rng))?;
                continue;
            }

            let color = state.on_roll();
            let advisor = match color {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let m = choose_move(&mut *advisor, state).ok_or_else(|| RunError::NoMoveChosen {
                advisor: advisor.name().to_string(),
                color,
            })?;
            debug!(id = %id, turn = state.turn(), mv = %m, "advisor chose move");
            moves.push(m.to_notation());
            snapshot = update(&mut self.store, &id, SAVE_ATTEMPTS, |s| s.make_move(m))?;
        }

        let state = &snapshot.state;
        let record = GameRecord {
            id,
            outcome: Outcome::from_winner(state.winner()),
            turns: state.turn(),
            moves,
            forfeited_dice,
            white_pips: state.board().pip_count(Color::White),
            black_pips: state.board().pip_count(Color::Black),
            version: snapshot.version,
        };
        info!(
            id = %record.id,
            outcome = ?record.outcome,
            turns = record.turns,
            moves = record.moves.len(),
            "game over"
        );
        Ok(record)
    }
}
