//! Auth-session state for the current client.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` exists per client and is handed to everything that
//! needs it (API client, guard, login flow). The token is trusted from the
//! moment it is stored until an authorized call comes back 401, at which
//! point the API client forces a logout.
//!
//! Sign-in/sign-out are broadcast through a `watch` channel so any number of
//! listeners can react without polling.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::storage::{TOKEN_KEY, TokenStorage};

/// The authenticated state of this client, backed by durable storage.
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    token: watch::Sender<Option<String>>,
}

impl SessionStore {
    /// Build a session from whatever token the storage already holds.
    ///
    /// A stored token is accepted as-is: no expiry check, no round-trip.
    /// Unreadable storage starts the session signed out.
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable; starting signed out");
                None
            }
        };
        tracing::debug!(authenticated = token.is_some(), "session restored");
        Self { storage, token: watch::Sender::new(token) }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Current bearer token, if signed in.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Persist `token` and mark the session authenticated.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
        self.token.send_replace(Some(token));
        tracing::info!("signed in");
    }

    /// Clear the persisted token and mark the session unauthenticated.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to clear persisted session token");
        }
        self.token.send_replace(None);
        tracing::info!("signed out");
    }

    /// Observe sign-in/sign-out. The receiver always sees the latest token.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
