//! Unified manager for bearer-token lifecycles across stateful providers.
//!
//! Responsibilities:
//! - Serve the cached token while it is valid.
//! - Run the provider's login when the token is missing or expired, blocking
//!   the caller until it resolves.
//! - Allow at most one login per provider at a time; callers that queued
//!   behind a login reuse its token.
use crate::TokenCache;
use farelink_types::{Authenticator, FarelinkError, ProviderId, TokenState, traits::Result};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

pub struct AuthManager {
    cache: TokenCache,
    guards: Mutex<HashMap<ProviderId, Arc<tokio::sync::Mutex<()>>>>,
}

impl AuthManager {
    pub fn new(cache: TokenCache) -> Self {
        Self {
            cache,
            guards: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Return a valid token for the authenticator's provider, logging in first
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FarelinkError::Auth`] if the login fails for any reason. The
    /// cache is left untouched in that case.
    pub async fn bearer_token(&self, authenticator: &dyn Authenticator) -> Result<String> {
        let provider = authenticator.provider();
        if let Some(token) = self.cache.valid_token(provider) {
            return Ok(token);
        }

        let guard = self.guard(provider);
        let _held = guard.lock().await;

        // A login that finished while we waited already refreshed the cache.
        if let Some(token) = self.cache.valid_token(provider) {
            tracing::debug!(provider = %provider, "reusing token from concurrent login");
            return Ok(token);
        }

        let state = self.cache.state(provider);
        tracing::info!(provider = %provider, state = ?state, "authenticating");

        let token = authenticator.authenticate().await.map_err(|e| match e {
            FarelinkError::Auth(_) => e,
            other => FarelinkError::Auth(format!("{provider} login failed: {other}")),
        })?;

        let cached = self.cache.store(provider, token);
        tracing::info!(
            provider = %provider,
            valid_for_secs = self.cache.validity().as_secs(),
            "token cached"
        );
        Ok(cached.token)
    }

    /// Current token state for `provider`.
    #[must_use]
    pub fn state(&self, provider: ProviderId) -> TokenState {
        self.cache.state(provider)
    }

    fn guard(&self, provider: ProviderId) -> Arc<tokio::sync::Mutex<()>> {
        let mut guards = self.guards.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(guards.entry(provider).or_default())
    }
}
