//! Self-play driver for the backgammon engine.
//!
//! Plays complete games between two move advisors, persisting every
//! transition through a [`store::MemoryStore`] and reporting per-game
//! records and match totals.

pub mod advisors;
pub mod config;
pub mod runner;
pub mod store;
