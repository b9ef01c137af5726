// src/utils/revocation.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

/// Tokens invalidated by logout, kept until their own expiry.
#[derive(Debug, Clone, Default)]
pub struct RevocationList {
    tokens: Arc<RwLock<HashMap<String, usize>>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes `token` until the Unix timestamp `expires_at`.
    pub async fn revoke(&self, token: &str, expires_at: usize) {
        let now = now_secs();
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, exp| *exp > now);
        tokens.insert(token.to_owned(), expires_at);
    }

    pub async fn is_revoked(&self, token: &str) -> bool {
        let tokens = self.tokens.read().await;
        tokens.get(token).is_some_and(|exp| *exp > now_secs())
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}
