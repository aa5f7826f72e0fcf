//! Persistence boundary.
//!
//! The engine holds no state between calls. Callers keep [`GameState`]
//! values in a [`GameStore`] of their own, load one before a transition and
//! save the result afterwards. Each stored state carries a version so that
//! concurrent writers for the same game are detected instead of silently
//! overwriting each other.

use crate::board::BoardError;
use crate::game::{GameError, GameState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by stores and by [`update`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game not found: {0}")]
    NotFound(String),

    #[error("version conflict on game {id}: expected {expected}, found {found}")]
    VersionConflict { id: String, expected: u64, found: u64 },

    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] BoardError),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// A stored game state and its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u64,
    pub state: GameState,
}

impl Snapshot {
    /// Encodes the snapshot as JSON.
    pub fn encode_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot from JSON, rejecting boards that break checker
    /// conservation and states whose status, winner and dice disagree.
    pub fn decode_json(s: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(s)?;
        snapshot.state.verify()?;
        if let Some(reason) = snapshot.state.inconsistency() {
            return Err(StoreError::Inconsistent(reason));
        }
        Ok(snapshot)
    }
}

/// Storage for game states, implemented by the surrounding application.
pub trait GameStore {
    /// Stores a new game at version 1 and returns its id.
    fn create(&mut self, state: GameState) -> Result<String, StoreError>;

    /// Loads the latest snapshot of a game.
    fn load(&self, id: &str) -> Result<Snapshot, StoreError>;

    /// Replaces the stored state if its version still equals `expected_version`.
    ///
    /// Returns the new version, or [`StoreError::VersionConflict`] if another
    /// writer got there first.
    fn save(&mut self, id: &str, expected_version: u64, state: GameState) -> Result<u64, StoreError>;
}

/// Loads a game, applies `transition`, and saves the result.
///
/// On a version conflict the whole cycle is retried, up to `attempts` times,
/// against freshly loaded state. Rejected transitions are returned at once.
pub fn update<S, F>(store: &mut S, id: &str, attempts: usize, mut transition: F) -> Result<Snapshot, StoreError>
where
    S: GameStore + ?Sized,
    F: FnMut(&GameState) -> Result<GameState, GameError>,
{
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let current = store.load(id)?;
        let next = transition(&current.state)?;
        match store.save(id, current.version, next.clone()) {
            Ok(version) => return Ok(Snapshot { version, state: next }),
            Err(conflict @ StoreError::VersionConflict { .. }) if attempt < attempts => {
                tracing::debug!(id, attempt, error = %conflict, "retrying after version conflict");
            }
            Err(other) => return Err(other),
        }
    }
}
