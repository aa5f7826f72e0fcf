//! Deterministic backgammon rules engine.
//!
//! This crate provides:
//! - [`Board`] - the 24 points plus bar and borne-off counters
//! - [`validate`] - single-move legality with a precise [`MoveError`]
//! - [`apply`] - pure move execution, including hits and bearing off
//! - [`legal_moves`] and [`legal_plays`] - move and full-roll enumeration
//! - [`GameState`] - the turn and game state machine
//! - [`GameStore`] and [`MoveAdvisor`] - interfaces for persistence and
//!   external move ranking
//!
//! # Architecture
//!
//! Every operation is a pure function over immutable values. The engine
//! keeps no state between calls and performs no I/O: the caller loads a
//! [`GameState`], applies a transition, and stores the result.
//!
//! # Example
//!
//! ```
//! use backgammon_engine::{Color, Dice, GameState, Move};
//!
//! let game = GameState::new()
//!     .start(Color::White)
//!     .unwrap()
//!     .start_turn_with_dice(Dice::new(3, 1).unwrap())
//!     .unwrap();
//! println!("Legal moves for 3-1: {}", game.legal_moves().len());
//!
//! let game = game.make_move(Move::parse("8/5", Color::White).unwrap()).unwrap();
//! let game = game.make_move(Move::parse("6/5", Color::White).unwrap()).unwrap();
//! assert_eq!(game.on_roll(), Color::Black);
//! ```

pub mod advisor;
mod board;
mod execute;
mod game;
pub mod movegen;
pub mod rules;
pub mod store;

pub use advisor::{choose_move, FirstLegal, MoveAdvisor};
pub use backgammon_core::{Color, Destination, Dice, DiceError, Move, Point, Source};
pub use board::{Board, BoardError, BAR_PIPS};
pub use execute::apply;
pub use game::{GameError, GameState, GameStatus};
pub use movegen::plays::{count_plays, legal_plays, maximal_moves, Play};
pub use movegen::{has_legal_move, legal_moves, playable_dice, MoveList};
pub use rules::{validate, DiceRule, MoveError};
pub use store::{GameStore, Snapshot, StoreError};
