//! Storage ports for registered users and submitted scores.
//!
//! Both collections are append-only: nothing is ever updated or removed, and
//! readers get owned snapshots. Adapters surface failures as [`StoreError`]
//! instead of panicking so handlers can answer with a 500.

pub mod memory;

pub use memory::{MemoryCredentialStore, MemoryScoreStore};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// A registered player.
///
/// Handles are not unique; several users may share one.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "userHandle")]
    pub user_handle: String,
    pub password: String,
}

/// An accepted high score.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub level: String,
    #[serde(rename = "userHandle")]
    pub user_handle: String,
    /// Kept as submitted so integers round-trip without gaining a fraction.
    #[schema(value_type = f64)]
    pub score: Number,
    #[schema(value_type = Object)]
    pub timestamp: Value,
}

impl ScoreEntry {
    /// Score as a float for ordering.
    #[must_use]
    pub fn score_value(&self) -> f64 {
        self.score.as_f64().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing collection is not in a readable or writable state.
    #[error("Server error: {0} data is missing.")]
    Unavailable(&'static str),
}

pub trait CredentialStore: Send + Sync {
    /// Append a user.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn append(&self, user: User) -> Result<(), StoreError>;

    /// First user, in insertion order, whose handle and password both equal
    /// the given ones.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn find(&self, user_handle: &str, password: &str) -> Result<Option<User>, StoreError>;
}

pub trait ScoreStore: Send + Sync {
    /// Append a score entry.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn append(&self, entry: ScoreEntry) -> Result<(), StoreError>;

    /// Every entry for `level`, in insertion order.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn by_level(&self, level: &str) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Number of stored entries across all levels.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn len(&self) -> Result<usize, StoreError>;

    /// Whether no entries are stored.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the collection is unusable.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
