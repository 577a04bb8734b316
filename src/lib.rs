//! # Scoreboard
//!
//! `scoreboard` is a small game backend: players sign up, log in to obtain a
//! signed session token, and submit high scores that anyone can browse as a
//! per-level leaderboard.
//!
//! ## Session tokens
//!
//! Tokens are HS256 JWTs bound to the player handle with a fixed two day
//! lifetime. They are stateless: nothing is stored server side and there is
//! no revocation. Every score submission must carry one as
//! `Authorization: Bearer <token>`.
//!
//! ## Leaderboards
//!
//! Scores are filtered by level (exact, case-sensitive match), sorted by score
//! descending with insertion order kept for ties, and served in pages of
//! [`leaderboard::PAGE_SIZE`] entries.
//!
//! ## Storage
//!
//! Users and scores live in append-only in-memory stores behind the
//! [`store::CredentialStore`] and [`store::ScoreStore`] traits.

pub mod accounts;
pub mod api;
pub mod cli;
pub mod error;
pub mod leaderboard;
pub mod store;
pub mod token;

pub use error::Error;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
