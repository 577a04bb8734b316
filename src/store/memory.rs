//! Process-lifetime in-memory adapters.
//!
//! Each append happens under a short write lock, so a concurrent reader sees
//! either the collection before the push or after it, never a half-written
//! element. A lock poisoned by a panicking writer is reported as
//! [`StoreError::Unavailable`] rather than trusted.

use std::sync::RwLock;

use tracing::debug;

use super::{CredentialStore, ScoreEntry, ScoreStore, StoreError, User};

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<Vec<User>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn append(&self, user: User) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::Unavailable("users"))?;
        users.push(user);
        debug!("users stored: {}", users.len());
        Ok(())
    }

    fn find(&self, user_handle: &str, password: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::Unavailable("users"))?;
        Ok(users
            .iter()
            .find(|user| user.user_handle == user_handle && user.password == password)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: RwLock<Vec<ScoreEntry>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn append(&self, entry: ScoreEntry) -> Result<(), StoreError> {
        let mut scores = self
            .scores
            .write()
            .map_err(|_| StoreError::Unavailable("highScores"))?;
        scores.push(entry);
        debug!("high scores stored: {}", scores.len());
        Ok(())
    }

    fn by_level(&self, level: &str) -> Result<Vec<ScoreEntry>, StoreError> {
        let scores = self
            .scores
            .read()
            .map_err(|_| StoreError::Unavailable("highScores"))?;
        Ok(scores
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.scores
            .read()
            .map(|scores| scores.len())
            .map_err(|_| StoreError::Unavailable("highScores"))
    }
}
