use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    accounts::Accounts,
    leaderboard::Leaderboard,
    store::{CredentialStore, MemoryCredentialStore, MemoryScoreStore, ScoreStore},
    token::TokenService,
};

/// Services shared by every request, handed to the router as extensions.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<Accounts>,
    pub leaderboard: Arc<Leaderboard>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        scores: Arc<dyn ScoreStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts: Arc::new(Accounts::new(credentials, tokens.clone())),
            leaderboard: Arc::new(Leaderboard::new(scores)),
            tokens,
        }
    }

    /// State backed by fresh, empty in-memory stores.
    #[must_use]
    pub fn in_memory(secret: &SecretString) -> Self {
        Self::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryScoreStore::new()),
            Arc::new(TokenService::new(secret)),
        )
    }
}
