//! Passkey session gate for the dashboard
//!
//! An explicit session object owned by the application state, replacing the
//! ambient per-browser flag of earlier deployments. Presenting the shared
//! passkey yields a random bearer token with a fixed expiry; dashboard
//! requests carry the token and are checked against it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

const TOKEN_LEN: usize = 32;

/// Session gate errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid passkey")]
    InvalidPasskey,
}

/// Issues and validates dashboard session tokens
pub struct SessionGate {
    passkey: String,
    ttl: Duration,
    sessions: Mutex<HashMap<String, Instant>>,
}

impl SessionGate {
    pub fn new(passkey: impl Into<String>, ttl: Duration) -> Self {
        Self {
            passkey: passkey.into(),
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Session lifetime granted by [`issue`](Self::issue)
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Exchange the shared passkey for a session token
    pub fn issue(&self, passkey: &str) -> Result<String, SessionError> {
        if passkey != self.passkey {
            return Err(SessionError::InvalidPasskey);
        }

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut sessions = self.lock_sessions();
        let now = Instant::now();
        sessions.retain(|_, issued| now.duration_since(*issued) < self.ttl);
        sessions.insert(token.clone(), now);

        Ok(token)
    }

    /// Check a presented token; expired tokens are removed and rejected
    pub fn check(&self, token: &str) -> bool {
        let mut sessions = self.lock_sessions();
        match sessions.get(token) {
            Some(issued) if issued.elapsed() < self.ttl => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
