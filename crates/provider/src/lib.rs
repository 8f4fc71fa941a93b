//! Provider clients and the transports beneath them.
//!
//! Each provider module implements [`FlightProvider`] for one booking
//! backend. Every outbound call goes through a [`ResilientCaller`]: the
//! in-process [`PrimaryTransport`] first, then a single [`CurlTransport`]
//! attempt when the policy allows. [`make_provider`] and [`build_providers`]
//! wire clients from configuration and loaded credentials.

pub mod bdfare;
pub mod caller;
pub mod curl;
pub mod flyhub;
pub mod http_util;

#[cfg(test)]
pub(crate) mod test_support;

pub use bdfare::BdfareClient;
pub use caller::{FallbackPolicy, ResilientCaller};
pub use curl::CurlTransport;
pub use flyhub::{FlyhubAuthenticator, FlyhubClient};
pub use http_util::PrimaryTransport;

use farelink_auth::{AuthManager, TokenCache};
use farelink_config::{Config, CredentialStore, ProviderCredential, TimeoutConfig};
use farelink_types::{FlightProvider, ProviderId};
use std::{collections::HashMap, sync::Arc};

/// Enabled provider clients keyed by id.
pub type ProviderSet = HashMap<ProviderId, Arc<dyn FlightProvider>>;

/// Create the client for `provider`.
///
/// Stateless providers ignore `auth`.
pub fn make_provider(
    provider: ProviderId,
    credential: Arc<ProviderCredential>,
    caller: Arc<ResilientCaller>,
    auth: Arc<AuthManager>,
    timeouts: TimeoutConfig,
) -> Arc<dyn FlightProvider> {
    match provider {
        ProviderId::Bdfare => Arc::new(BdfareClient::new(credential, caller, timeouts)),
        ProviderId::Flyhub => Arc::new(FlyhubClient::new(credential, caller, auth, timeouts)),
    }
}

/// Create one client per provider that has loaded credentials.
///
/// All clients share a single [`ResilientCaller`] (and so one connection
/// pool) and a single [`AuthManager`].
pub fn build_providers(config: &Config, credentials: &CredentialStore) -> ProviderSet {
    let caller = Arc::new(ResilientCaller::from_config(&config.fallback));
    let auth = Arc::new(AuthManager::new(TokenCache::new(config.token_validity())));

    credentials
        .providers()
        .filter(|p| config.is_enabled(*p))
        .filter_map(|p| credentials.get(p).map(|c| (p, c)))
        .map(|(p, credential)| {
            let client = make_provider(
                p,
                credential,
                Arc::clone(&caller),
                Arc::clone(&auth),
                config.timeouts.clone(),
            );
            tracing::debug!(provider = %p, "provider client ready");
            (p, client)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use farelink_config::ProviderConfig;

    fn lookup(key: &str) -> Option<String> {
        match key {
            "BDFARE_BASE_URL" => Some("https://bdf.example/api/".into()),
            "FLYHUB_PRODUCTION_URL" => Some("https://flyhub.example/api".into()),
            "BDFARE_API_KEY" | "FLYHUB_API_KEY" => Some("k".into()),
            "FLYHUB_USERNAME" => Some("agent".into()),
            _ => None,
        }
    }

    #[test]
    fn test_build_providers_all_enabled() {
        let config = Config::default();
        let store = CredentialStore::from_lookup(&config, lookup).unwrap();
        let set = build_providers(&config, &store);
        assert_eq!(set.len(), 2);
        assert_eq!(set[&ProviderId::Bdfare].id(), ProviderId::Bdfare);
        assert_eq!(set[&ProviderId::Flyhub].id(), ProviderId::Flyhub);
    }

    #[test]
    fn test_build_providers_skips_disabled() {
        let mut config = Config::default();
        config
            .providers
            .insert(ProviderId::Flyhub, ProviderConfig { enabled: false });
        let store = CredentialStore::from_lookup(&config, lookup).unwrap();
        let set = build_providers(&config, &store);
        assert!(set.contains_key(&ProviderId::Bdfare));
        assert!(!set.contains_key(&ProviderId::Flyhub));
    }

    #[test]
    fn test_make_provider_ids() {
        let cred = Arc::new(ProviderCredential {
            provider: ProviderId::Bdfare,
            base_url: "http://x".into(),
            api_key: "k".to_string().into(),
            username: None,
        });
        let caller = Arc::new(ResilientCaller::new(Arc::new(PrimaryTransport::new()), None));
        let auth = Arc::new(AuthManager::new(TokenCache::new(
            std::time::Duration::from_secs(60),
        )));
        for p in ProviderId::all() {
            let client = make_provider(
                *p,
                Arc::clone(&cred),
                Arc::clone(&caller),
                Arc::clone(&auth),
                TimeoutConfig::default(),
            );
            assert_eq!(client.id(), *p);
        }
    }
}
