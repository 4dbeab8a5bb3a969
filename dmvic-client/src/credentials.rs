use crate::traits::CredentialStore;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Process-local token cache; an expired token reads as absent
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    cached: RwLock<Option<CachedToken>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached token, if any
    pub async fn clear(&self) {
        *self.cached.write().await = None;
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn get_token(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.token.clone())
    }

    async fn set_token(&self, token: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        *self.cached.write().await = Some(CachedToken { token, expires_at });
    }
}
