use farelink_types::{Operation, ProviderId};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, time::Duration};

fn default_true() -> bool {
    true
}

/// Configuration for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether this provider is enabled (defaults to `true`).
    ///
    /// Disabled providers need no credentials and their routes answer 503.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_call_secs() -> u64 {
    30
}
fn default_price_secs() -> u64 {
    60
}

/// Per-operation timeouts for the primary transport, in seconds.
///
/// Every operation is bounded; a call that outlives its timeout is a
/// transport failure and goes to the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_call_secs")]
    pub search_secs: u64,
    #[serde(default = "default_price_secs")]
    pub price_secs: u64,
    #[serde(default = "default_call_secs")]
    pub auth_secs: u64,
    #[serde(default = "default_call_secs")]
    pub balance_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            search_secs: default_call_secs(),
            price_secs: default_price_secs(),
            auth_secs: default_call_secs(),
            balance_secs: default_call_secs(),
        }
    }
}

impl TimeoutConfig {
    /// Returns the configured timeout for `op`.
    #[must_use]
    pub fn for_operation(&self, op: Operation) -> Duration {
        let secs = match op {
            Operation::Search => self.search_secs,
            Operation::Price => self.price_secs,
            Operation::Authenticate => self.auth_secs,
            Operation::Balance => self.balance_secs,
        };
        Duration::from_secs(secs)
    }
}

fn default_fallback_program() -> String {
    "curl".to_string()
}
fn default_fallback_timeout_secs() -> u64 {
    120
}

/// Settings for the command-line fallback transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Executable invoked with curl-style arguments.
    #[serde(default = "default_fallback_program")]
    pub program: String,
    /// Arguments placed before the generated curl arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Hard bound on the subprocess, in seconds.
    #[serde(default = "default_fallback_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_fallback_program(),
            args: Vec::new(),
            timeout_secs: default_fallback_timeout_secs(),
        }
    }
}

impl FallbackConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_port() -> u16 {
    8018
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_token_validity_secs() -> u64 {
    3600
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listen port (defaults to 8018).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Listen address (defaults to `127.0.0.1`).
    #[serde(default = "default_host")]
    pub host: String,
    /// How long a freshly issued provider token is trusted, in seconds.
    #[serde(default = "default_token_validity_secs")]
    pub token_validity_secs: u64,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Provider configuration map. Providers absent from the map are enabled.
    #[serde(default)]
    pub providers: HashMap<ProviderId, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            token_validity_secs: default_token_validity_secs(),
            timeouts: TimeoutConfig::default(),
            fallback: FallbackConfig::default(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    /// Loads defaults, then the optional YAML file, then `FARELINK_*`
    /// environment overrides (`FARELINK_FALLBACK__TIMEOUT_SECS=30`).
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if any layer fails to parse.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("FARELINK_").split("__"))
            .extract()
    }

    /// Whether `provider` is enabled.
    #[must_use]
    pub fn is_enabled(&self, provider: ProviderId) -> bool {
        self.providers.get(&provider).is_none_or(|p| p.enabled)
    }

    /// Enabled providers in declaration order.
    #[must_use]
    pub fn enabled_providers(&self) -> Vec<ProviderId> {
        ProviderId::all()
            .iter()
            .copied()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }

    #[must_use]
    pub fn token_validity(&self) -> Duration {
        Duration::from_secs(self.token_validity_secs)
    }
}
