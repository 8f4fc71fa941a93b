//! Process-wide, per-provider bearer token cache.

use farelink_types::{CachedToken, Clock, ProviderId, SystemClock, TokenState};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

/// Holds the current token of each stateful provider.
///
/// Entries are created or overwritten on successful login and never removed.
pub struct TokenCache {
    clock: Arc<dyn Clock>,
    validity: Duration,
    entries: Mutex<HashMap<ProviderId, CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache whose tokens live for `validity`.
    #[must_use]
    pub fn new(validity: Duration) -> Self {
        Self::with_clock(validity, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    #[must_use]
    pub fn with_clock(validity: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            validity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Current state of `provider`'s token.
    #[must_use]
    pub fn state(&self, provider: ProviderId) -> TokenState {
        let now = self.clock.now();
        self.lock()
            .get(&provider)
            .map_or(TokenState::NoToken, |t| t.state_at(now))
    }

    /// The cached token string, only if it has not expired.
    #[must_use]
    pub fn valid_token(&self, provider: ProviderId) -> Option<String> {
        let now = self.clock.now();
        self.lock()
            .get(&provider)
            .filter(|t| !t.is_expired_at(now))
            .map(|t| t.token.clone())
    }

    /// Snapshot of the cached entry regardless of expiry.
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<CachedToken> {
        self.lock().get(&provider).cloned()
    }

    /// Stores `token` for `provider`, expiring one validity window from now.
    pub fn store(&self, provider: ProviderId, token: impl Into<String>) -> CachedToken {
        let cached = CachedToken::new(provider, token, self.clock.now(), self.validity);
        self.lock().insert(provider, cached.clone());
        cached
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ProviderId, CachedToken>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Instant;

    /// Clock that only moves when told to.
    pub(crate) struct ManualClock(Mutex<Instant>);

    impl ManualClock {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Instant::now())))
        }

        pub(crate) fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().unwrap()
        }
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_empty_cache_has_no_token() {
        let cache = TokenCache::new(HOUR);
        assert_eq!(cache.state(ProviderId::Flyhub), TokenState::NoToken);
        assert!(cache.valid_token(ProviderId::Flyhub).is_none());
    }

    #[test]
    fn test_store_then_valid() {
        let clock = ManualClock::new();
        let cache = TokenCache::with_clock(HOUR, clock.clone());
        let t0 = clock.now();
        let cached = cache.store(ProviderId::Flyhub, "abc123");
        assert_eq!(cached.expires_at, t0 + HOUR);
        assert_eq!(cache.state(ProviderId::Flyhub), TokenState::Valid);
        assert_eq!(cache.valid_token(ProviderId::Flyhub).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_expires_at_window_boundary() {
        let clock = ManualClock::new();
        let cache = TokenCache::with_clock(HOUR, clock.clone());
        cache.store(ProviderId::Flyhub, "abc123");

        clock.advance(HOUR - Duration::from_secs(1));
        assert_eq!(cache.state(ProviderId::Flyhub), TokenState::Valid);

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.state(ProviderId::Flyhub), TokenState::Expired);
        assert!(cache.valid_token(ProviderId::Flyhub).is_none());
        // The entry is superseded later, never deleted.
        assert!(cache.get(ProviderId::Flyhub).is_some());
    }

    #[test]
    fn test_store_overwrites() {
        let cache = TokenCache::new(HOUR);
        cache.store(ProviderId::Flyhub, "first");
        cache.store(ProviderId::Flyhub, "second");
        assert_eq!(cache.valid_token(ProviderId::Flyhub).as_deref(), Some("second"));
    }

    #[test]
    fn test_providers_are_independent() {
        let cache = TokenCache::new(HOUR);
        cache.store(ProviderId::Flyhub, "fh");
        assert_eq!(cache.state(ProviderId::Bdfare), TokenState::NoToken);
    }
}
