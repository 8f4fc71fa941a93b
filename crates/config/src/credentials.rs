//! Static provider credentials, read once from the environment.
//!
//! Validation is all-or-nothing: every missing key of every enabled provider
//! is collected and reported together, so the process refuses to start
//! rather than serving a partially configured surface.

use crate::Config;
use farelink_types::{FarelinkError, ProviderId};
use secrecy::SecretString;
use std::{collections::HashMap, sync::Arc};

/// Static credentials for one provider. Immutable after startup.
#[derive(Debug)]
pub struct ProviderCredential {
    pub provider: ProviderId,
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub api_key: SecretString,
    /// Login name; only stateful providers carry one.
    pub username: Option<String>,
}

/// Environment variable names for a provider: `(base_url, api_key, username)`.
#[must_use]
pub fn env_keys(provider: ProviderId) -> (&'static str, &'static str, Option<&'static str>) {
    match provider {
        ProviderId::Bdfare => ("BDFARE_BASE_URL", "BDFARE_API_KEY", None),
        ProviderId::Flyhub => (
            "FLYHUB_PRODUCTION_URL",
            "FLYHUB_API_KEY",
            Some("FLYHUB_USERNAME"),
        ),
    }
}

/// Holds the validated credentials of every enabled provider.
#[derive(Debug, Default)]
pub struct CredentialStore {
    credentials: HashMap<ProviderId, Arc<ProviderCredential>>,
}

impl CredentialStore {
    /// Reads credentials for all enabled providers from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FarelinkError::MissingCredentials`] naming every missing or
    /// blank variable.
    pub fn from_env(config: &Config) -> Result<Self, FarelinkError> {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// Reads credentials through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FarelinkError::MissingCredentials`] naming every missing or
    /// blank variable.
    pub fn from_lookup(
        config: &Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, FarelinkError> {
        let mut missing = Vec::new();
        let mut credentials = HashMap::new();

        let mut required = |key: &'static str| -> Option<String> {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => Some(v),
                _ => {
                    missing.push(key.to_string());
                    None
                }
            }
        };

        for provider in config.enabled_providers() {
            let (url_key, api_key_key, username_key) = env_keys(provider);
            let base_url = required(url_key);
            let api_key = required(api_key_key);
            let username = username_key.map(&mut required);

            if let (Some(base_url), Some(api_key)) = (base_url, api_key) {
                if username.as_ref().is_some_and(Option::is_none) {
                    continue;
                }
                credentials.insert(
                    provider,
                    Arc::new(ProviderCredential {
                        provider,
                        base_url: base_url.trim_end_matches('/').to_string(),
                        api_key: api_key.into(),
                        username: username.flatten(),
                    }),
                );
            }
        }

        if !missing.is_empty() {
            tracing::error!(missing = ?missing, "provider credentials incomplete");
            return Err(FarelinkError::MissingCredentials(missing));
        }

        for provider in credentials.keys() {
            tracing::info!(provider = %provider, "credentials loaded");
        }
        Ok(Self { credentials })
    }

    /// Credentials for `provider`, if it is enabled.
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<Arc<ProviderCredential>> {
        self.credentials.get(&provider).cloned()
    }

    /// Providers with loaded credentials.
    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.credentials.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
