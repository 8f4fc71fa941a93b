//! Cached bearer token representation and expiry logic.

use crate::ProviderId;
use std::time::{Duration, Instant};

/// A bearer token issued by a stateful provider, with a locally chosen expiry.
///
/// The expiry is a policy window applied at login time, not the provider's
/// own token lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub provider: ProviderId,
    pub token: String,
    pub expires_at: Instant,
}

impl CachedToken {
    /// Create a token issued at `issued_at` that stays valid for `validity`.
    pub fn new(
        provider: ProviderId,
        token: impl Into<String>,
        issued_at: Instant,
        validity: Duration,
    ) -> Self {
        Self {
            provider,
            token: token.into(),
            expires_at: issued_at + validity,
        }
    }

    /// Return `true` once `now` has reached `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Usability state of the token at `now`.
    #[must_use]
    pub fn state_at(&self, now: Instant) -> TokenState {
        if self.is_expired_at(now) {
            TokenState::Expired
        } else {
            TokenState::Valid
        }
    }
}

/// Describes whether a provider currently has a usable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No login has succeeded yet.
    NoToken,
    Valid,
    /// A token exists but its validity window has elapsed.
    Expired,
}
