//! Admin session tokens.
//!
//! The admin credential is injected at startup from configuration and
//! checked server-side; a successful login mints a request-scoped bearer
//! token. Tokens live only in process memory, so authentication state is
//! lost on restart. There is no lockout or rate limiting.

use crate::error::ApiError;
use rand::RngCore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Session token size in bytes (rendered as hex).
const TOKEN_BYTES: usize = 32;

/// In-memory admin session set.
#[derive(Clone)]
pub struct AdminSessions {
    password: Arc<String>,
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl AdminSessions {
    /// Create a session set guarding the given password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Arc::new(password.into()),
            tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Check a submitted password and mint a session token on exact match.
    pub async fn login(&self, candidate: &str) -> Result<String, ApiError> {
        if candidate != self.password.as_str() {
            warn!("Rejected admin login attempt");
            return Err(ApiError::IncorrectPassword);
        }

        let token = mint_token();
        self.tokens.write().await.insert(token.clone());
        info!("Admin session opened");
        Ok(token)
    }

    /// Check whether a token belongs to an open session.
    pub async fn verify(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }
}

fn mint_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_exact_match() {
        let sessions = AdminSessions::new("open-sesame");

        let token = sessions.login("open-sesame").await.unwrap();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(sessions.verify(&token).await);
    }

    #[tokio::test]
    async fn test_login_rejects_mismatch() {
        let sessions = AdminSessions::new("open-sesame");

        for candidate in ["", "open-sesame ", "Open-Sesame", "wrong"] {
            let result = sessions.login(candidate).await;
            assert!(matches!(result, Err(ApiError::IncorrectPassword)));
        }
    }

    #[tokio::test]
    async fn test_verify_unknown_token() {
        let sessions = AdminSessions::new("open-sesame");
        assert!(!sessions.verify("deadbeef").await);
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let sessions = AdminSessions::new("open-sesame");

        let a = sessions.login("open-sesame").await.unwrap();
        let b = sessions.login("open-sesame").await.unwrap();

        assert_ne!(a, b);
        assert!(sessions.verify(&a).await);
        assert!(sessions.verify(&b).await);
    }
}
