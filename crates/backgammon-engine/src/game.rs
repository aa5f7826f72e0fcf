//! Game state machine.
//!
//! A [`GameState`] moves one way through `Waiting -> Playing -> Finished`.
//! Within `Playing`, each turn rolls dice, applies moves one die at a time,
//! and hands the roll to the opponent once the dice are used up or none of
//! the remaining dice can be played.
//!
//! Every transition takes `&self` and returns a new state; a failed
//! transition leaves the original untouched.

use crate::board::BoardError;
use crate::execute::apply;
use crate::movegen::plays::maximal_moves;
use crate::movegen::{legal_moves, MoveList};
use crate::rules::{validate, DiceRule, MoveError};
use crate::Board;
use backgammon_core::{Color, Dice, Move};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Lifecycle stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Playing => write!(f, "playing"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Error type for game transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("game is {0}, not playing")]
    NotPlaying(GameStatus),

    #[error("game has already started")]
    AlreadyStarted,

    #[error("dice have not been rolled this turn")]
    DiceNotRolled,

    #[error("dice have already been rolled this turn")]
    DiceAlreadyRolled,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),
}

/// A complete game at one point in time.
///
/// The engine keeps no state between calls: callers load a `GameState`,
/// apply one transition, and store the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    /// Dice for the current turn; `None` while waiting for a roll.
    dice: Option<Dice>,
    on_roll: Color,
    status: GameStatus,
    winner: Option<Color>,
    #[serde(default)]
    dice_rule: DiceRule,
    /// Die values left unplayed when the previous turn ended.
    #[serde(default)]
    forfeited: Vec<u8>,
    /// Number of turns started so far.
    #[serde(default)]
    turn: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game waiting to start from the standard layout.
    pub fn new() -> Self {
        Self::with_rule(DiceRule::default())
    }

    /// Creates a waiting game that enforces `dice_rule`.
    pub fn with_rule(dice_rule: DiceRule) -> Self {
        GameState {
            board: Board::initial(),
            dice: None,
            on_roll: Color::White,
            status: GameStatus::Waiting,
            winner: None,
            dice_rule,
            forfeited: Vec::new(),
            turn: 0,
        }
    }

    /// Creates a game in progress from an arbitrary board, awaiting `on_roll`'s roll.
    ///
    /// A board on which a color has already borne off every checker yields a
    /// finished game.
    pub fn from_position(board: Board, on_roll: Color, dice_rule: DiceRule) -> Self {
        let mut state = GameState {
            board,
            dice: None,
            on_roll,
            status: GameStatus::Playing,
            winner: None,
            dice_rule,
            forfeited: Vec::new(),
            turn: 0,
        };
        state.check_winner();
        state
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the dice for the current turn, if rolled.
    pub fn dice(&self) -> Option<&Dice> {
        self.dice.as_ref()
    }

    /// Returns the color whose turn it is.
    pub fn on_roll(&self) -> Color {
        self.on_roll
    }

    /// Returns the lifecycle stage.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner once the game is finished.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns the dice rule in force.
    pub fn dice_rule(&self) -> DiceRule {
        self.dice_rule
    }

    /// Returns the die values left unplayed when the last turn ended.
    pub fn forfeited(&self) -> &[u8] {
        &self.forfeited
    }

    /// Returns the number of turns started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns true if the game has ended.
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Returns true if the player on roll still has to roll.
    pub fn awaiting_roll(&self) -> bool {
        self.status == GameStatus::Playing && self.dice.is_none()
    }

    /// Checks the board's checker conservation.
    pub fn verify(&self) -> Result<(), BoardError> {
        self.board.verify()
    }

    /// Describes the first way the status, winner and dice contradict each
    /// other, if any.
    pub(crate) fn inconsistency(&self) -> Option<&'static str> {
        match (self.status, self.winner, self.dice) {
            (GameStatus::Finished, None, _) => Some("finished game has no winner"),
            (GameStatus::Waiting | GameStatus::Playing, Some(_), _) => {
                Some("unfinished game has a winner")
            }
            (GameStatus::Waiting | GameStatus::Finished, _, Some(_)) => {
                Some("dice are set outside of play")
            }
            (GameStatus::Playing, _, _) if Color::ALL.into_iter().any(|c| self.board.has_won(c)) => {
                Some("game is still playing after a color bore off every checker")
            }
            _ => None,
        }
    }

    /// Returns every move the player on roll may make now.
    ///
    /// Empty unless the game is in progress with dice rolled.
    pub fn legal_moves(&self) -> MoveList {
        match (self.status, &self.dice) {
            (GameStatus::Playing, Some(dice)) => self.enumerate(dice),
            _ => MoveList::new(),
        }
    }

    fn enumerate(&self, dice: &Dice) -> MoveList {
        match self.dice_rule {
            DiceRule::PerDie => legal_moves(&self.board, dice, self.on_roll),
            DiceRule::Maximal => maximal_moves(&self.board, dice, self.on_roll),
        }
    }

    /// Starts the game with `first` on roll.
    pub fn start(&self, first: Color) -> Result<Self, GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        let mut next = self.clone();
        next.status = GameStatus::Playing;
        next.on_roll = first;
        debug!(first = %first, "game started");
        Ok(next)
    }

    /// Starts the game with an opening roll: the color with the higher die
    /// moves first and plays both opening dice.
    pub fn start_with_opening_roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, GameError> {
        let opening = Dice::opening_roll(rng);
        self.start(opening.first)?.start_turn_with_dice(opening.dice)
    }

    /// Rolls dice for the color on roll.
    pub fn start_turn<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, GameError> {
        self.start_turn_with_dice(Dice::roll(rng))
    }

    /// Begins the turn of the color on roll with externally supplied dice.
    ///
    /// If none of the dice can be played, the whole roll is forfeited and the
    /// opponent is on roll in the returned state.
    pub fn start_turn_with_dice(&self, dice: Dice) -> Result<Self, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying(self.status));
        }
        if self.dice.is_some() {
            return Err(GameError::DiceAlreadyRolled);
        }

        let mut next = self.clone();
        next.dice = Some(dice);
        next.forfeited.clear();
        next.turn += 1;
        debug!(turn = next.turn, color = %next.on_roll, dice = %dice, "turn started");

        next.settle_turn();
        Ok(next)
    }

    /// Validates and plays one move for the color on roll.
    pub fn make_move(&self, m: Move) -> Result<Self, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying(self.status));
        }
        let dice = self.dice.ok_or(GameError::DiceNotRolled)?;

        validate(&self.board, &dice, self.on_roll, m)?;
        if self.dice_rule == DiceRule::Maximal
            && !maximal_moves(&self.board, &dice, self.on_roll).contains(&m)
        {
            return Err(MoveError::DiceNotMaximized.into());
        }

        let mut next = self.clone();
        next.board = apply(&self.board, m);
        next.dice = Some(dice.consume(m.die).map_err(|_| MoveError::DieNotAvailable(m.die))?);
        debug!(turn = next.turn, mv = %m, "move played");

        if next.check_winner() {
            return Ok(next);
        }
        next.settle_turn();
        Ok(next)
    }

    /// Ends the game with `color` conceding to its opponent.
    pub fn resign(&self, color: Color) -> Result<Self, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying(self.status));
        }
        let mut next = self.clone();
        next.finish(color.opposite());
        Ok(next)
    }

    /// Finishes the game if either color has borne off every checker.
    fn check_winner(&mut self) -> bool {
        let winner = Color::ALL
            .into_iter()
            .find(|&c| self.board.has_won(c));
        match winner {
            Some(color) => {
                self.finish(color);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, winner: Color) {
        self.status = GameStatus::Finished;
        self.winner = Some(winner);
        self.dice = None;
        info!(winner = %winner, turns = self.turn, "game finished");
    }

    /// Ends the turn when the dice are used up or none of them can be played.
    ///
    /// A die that is blocked while another remaining die is playable stays
    /// available; only dice still unplayable at the end are forfeited.
    fn settle_turn(&mut self) {
        let Some(dice) = self.dice else {
            return;
        };
        if !dice.is_exhausted() && !self.enumerate(&dice).is_empty() {
            return;
        }

        self.forfeited = dice.remaining().collect();
        if !self.forfeited.is_empty() {
            debug!(color = %self.on_roll, forfeited = ?self.forfeited, "dice forfeited");
        }
        debug!(turn = self.turn, color = %self.on_roll, "turn complete");
        self.dice = None;
        self.on_roll = self.on_roll.opposite();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backgammon_core::{Destination, Point, Source};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dice(a: u8, b: u8) -> Dice {
        Dice::new(a, b).unwrap()
    }

    fn playing(board: Board, on_roll: Color) -> GameState {
        GameState::from_position(board, on_roll, DiceRule::PerDie)
    }

    #[test]
    fn new_game_is_waiting() {
        let game = GameState::new();
        assert_eq!(game.status(), GameStatus::Waiting);
        assert_eq!(game.winner(), None);
        assert!(game.dice().is_none());
        assert!(game.legal_moves().is_empty());
        assert_eq!(*game.board(), Board::initial());
    }

    #[test]
    fn cannot_roll_before_start() {
        let game = GameState::new();
        assert_eq!(
            game.start_turn_with_dice(dice(3, 1)),
            Err(GameError::NotPlaying(GameStatus::Waiting))
        );
    }

    #[test]
    fn start_only_once() {
        let game = GameState::new().start(Color::White).unwrap();
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.awaiting_roll());
        assert_eq!(game.start(Color::Black), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn opening_scenario_three_one() {
        let game = GameState::new()
            .start(Color::White)
            .unwrap()
            .start_turn_with_dice(dice(3, 1))
            .unwrap();
        assert_eq!(game.turn(), 1);

        let game = game.make_move(Move::between(7, 4, Color::White, 3)).unwrap();
        assert_eq!(game.on_roll(), Color::White);
        assert_eq!(game.dice().unwrap().remaining().collect::<Vec<_>>(), vec![1]);

        let game = game.make_move(Move::between(5, 4, Color::White, 1)).unwrap();
        assert_eq!(game.board().checkers_at(Point::new(4).unwrap(), Color::White), 2);
        assert!(game.dice().is_none());
        assert!(game.forfeited().is_empty());
        assert_eq!(game.on_roll(), Color::Black);
        assert!(game.awaiting_roll());
    }

    #[test]
    fn move_without_dice_rejected() {
        let game = GameState::new().start(Color::White).unwrap();
        assert_eq!(
            game.make_move(Move::between(7, 4, Color::White, 3)),
            Err(GameError::DiceNotRolled)
        );
    }

    #[test]
    fn cannot_roll_twice() {
        let game = GameState::new()
            .start(Color::White)
            .unwrap()
            .start_turn_with_dice(dice(3, 1))
            .unwrap();
        assert_eq!(
            game.start_turn_with_dice(dice(6, 5)),
            Err(GameError::DiceAlreadyRolled)
        );
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let game = GameState::new()
            .start(Color::White)
            .unwrap()
            .start_turn_with_dice(dice(3, 1))
            .unwrap();
        let before = game.clone();
        assert_eq!(
            game.make_move(Move::between(12, 11, Color::White, 1)),
            Err(GameError::IllegalMove(MoveError::BlockedPoint(Point::new(11).unwrap())))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn hitting_a_blot() {
        let board = Board::with_layout(&[(22, 15)], &[(18, 1), (10, 14)]);
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(4, 1))
            .unwrap()
            .make_move(Move::between(22, 18, Color::White, 4))
            .unwrap();
        assert_eq!(game.board().points[18], 1);
        assert_eq!(game.board().black_bar, 1);
    }

    #[test]
    fn forced_pass_switches_turn() {
        let mut board = Board::with_layout(
            &[(0, 13)],
            &[(18, 2), (19, 2), (20, 2), (21, 2), (22, 2), (23, 2)],
        );
        board.white_bar = 1;
        board.white_off -= 1;
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(5, 3))
            .unwrap();
        assert_eq!(game.on_roll(), Color::Black);
        assert!(game.awaiting_roll());
        assert_eq!(game.forfeited(), &[5, 3]);
        assert_eq!(*game.board(), board);
    }

    #[test]
    fn blocked_die_kept_while_other_is_playable() {
        // The 6 is blocked at first but opens up after playing the 1.
        let board = Board::with_layout(&[(8, 1), (4, 14)], &[(2, 2), (20, 13)]);
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(6, 1))
            .unwrap();
        assert_eq!(game.on_roll(), Color::White);
        assert!(game.dice().unwrap().contains(6));

        let game = game.make_move(Move::between(8, 7, Color::White, 1)).unwrap();
        assert_eq!(game.on_roll(), Color::White);
        let game = game.make_move(Move::between(7, 1, Color::White, 6)).unwrap();
        assert_eq!(game.on_roll(), Color::Black);
        assert!(game.forfeited().is_empty());
    }

    #[test]
    fn unusable_die_forfeited_after_other_played() {
        let board = Board::with_layout(&[(8, 1), (4, 14)], &[(2, 2), (1, 2), (20, 11)]);
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(6, 1))
            .unwrap();
        assert_eq!(game.on_roll(), Color::White);

        let game = game.make_move(Move::between(8, 7, Color::White, 1)).unwrap();
        assert_eq!(game.on_roll(), Color::Black);
        assert_eq!(game.forfeited(), &[6]);
    }

    #[test]
    fn double_partly_forfeited() {
        // The runner reaches 6 after two 2s; Black holds 4 and White is not
        // yet home, so the other two 2s cannot be played.
        let board = Board::with_layout(&[(10, 1), (1, 14)], &[(4, 2), (20, 13)]);
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(2, 2))
            .unwrap();
        assert_eq!(game.legal_moves().len(), 1);

        let game = game.make_move(Move::between(10, 8, Color::White, 2)).unwrap();
        assert_eq!(game.on_roll(), Color::White);
        assert_eq!(game.dice().unwrap().count(2), 3);

        let game = game.make_move(Move::between(8, 6, Color::White, 2)).unwrap();
        assert_eq!(game.on_roll(), Color::Black);
        assert!(game.awaiting_roll());
        assert_eq!(game.forfeited(), &[2, 2]);
        assert_eq!(game.board().checkers_at(Point::new(6).unwrap(), Color::White), 1);
    }

    #[test]
    fn bearing_off_last_checker_wins() {
        let board = Board::with_layout(&[(0, 1)], &[(20, 3)]);
        let game = playing(board, Color::White)
            .start_turn_with_dice(dice(2, 1))
            .unwrap();
        let off = Move::new(
            Source::Point(Point::new(0).unwrap()),
            Destination::Off,
            Color::White,
            1,
        );
        let game = game.make_move(off).unwrap();
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.board().white_off, 15);
        assert!(game.dice().is_none());

        assert_eq!(
            game.make_move(off),
            Err(GameError::NotPlaying(GameStatus::Finished))
        );
        assert_eq!(
            game.start_turn_with_dice(dice(3, 3)),
            Err(GameError::NotPlaying(GameStatus::Finished))
        );
        assert_eq!(game.resign(Color::White), Err(GameError::NotPlaying(GameStatus::Finished)));
    }

    #[test]
    fn from_position_detects_finished_game() {
        let game = playing(Board::empty(), Color::White);
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn resign_awards_opponent() {
        let game = GameState::new().start(Color::White).unwrap();
        let game = game.resign(Color::White).unwrap();
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn maximal_rule_rejects_lower_die() {
        let board = Board::with_layout(&[(10, 1), (1, 14)], &[(0, 2), (3, 2), (20, 11)]);
        let game = GameState::from_position(board, Color::White, DiceRule::Maximal)
            .start_turn_with_dice(dice(6, 1))
            .unwrap();
        assert_eq!(game.legal_moves().len(), 1);
        assert_eq!(
            game.make_move(Move::between(10, 9, Color::White, 1)),
            Err(GameError::IllegalMove(MoveError::DiceNotMaximized))
        );
        let game = game.make_move(Move::between(10, 4, Color::White, 6)).unwrap();
        assert_eq!(game.on_roll(), Color::Black);
        assert_eq!(game.forfeited(), &[1]);
    }

    #[test]
    fn opening_roll_starts_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let game = GameState::new().start_with_opening_roll(&mut rng).unwrap();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.turn(), 1);
        let d = game.dice().unwrap();
        assert!(!d.is_double());
        let (white, black) = d.values();
        let first = if white > black { Color::White } else { Color::Black };
        assert_eq!(game.on_roll(), first);
    }

    #[test]
    fn random_game_runs_to_completion() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = GameState::new().start(Color::White).unwrap();
        for _ in 0..20_000 {
            if game.is_finished() {
                break;
            }
            if game.awaiting_roll() {
                game = game.start_turn(&mut rng).unwrap();
                continue;
            }
            let moves = game.legal_moves();
            let m = moves[rng.gen_range(0..moves.len())];
            game = game.make_move(m).unwrap();
            assert!(game.verify().is_ok());
        }
        assert!(game.is_finished());
        let winner = game.winner().unwrap();
        assert_eq!(game.board().off(winner), 15);
    }
}
