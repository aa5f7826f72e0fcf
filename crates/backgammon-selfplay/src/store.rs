//! In-process game store that keeps each game as an encoded JSON snapshot.

use backgammon_engine::{GameState, GameStore, Snapshot, StoreError};
use std::collections::HashMap;

/// Keeps snapshots as JSON text, the way an external store would hold them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<String, String>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Drops a game, returning whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.games.remove(id).is_some()
    }
}

impl GameStore for MemoryStore {
    fn create(&mut self, state: GameState) -> Result<String, StoreError> {
        self.next_id += 1;
        let id = format!("game-{}", self.next_id);
        let encoded = Snapshot { version: 1, state }.encode_json()?;
        self.games.insert(id.clone(), encoded);
        Ok(id)
    }

    fn load(&self, id: &str) -> Result<Snapshot, StoreError> {
        let encoded = self
            .games
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Snapshot::decode_json(encoded)
    }

    fn save(&mut self, id: &str, expected_version: u64, state: GameState) -> Result<u64, StoreError> {
        let current = self.load(id)?;
        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected: expected_version,
                found: current.version,
            });
        }
        let version = current.version + 1;
        let encoded = Snapshot { version, state }.encode_json()?;
        self.games.insert(id.to_string(), encoded);
        Ok(version)
    }
}
