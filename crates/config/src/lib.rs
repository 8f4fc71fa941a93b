//! Configuration loading and credential validation for the farelink gateway.
//!
//! Non-secret settings come from figment (defaults, an optional YAML file,
//! `FARELINK_*` environment overrides). Provider secrets are read from the
//! process environment once at startup by [`CredentialStore`].

pub mod credentials;
pub mod schema;

pub use credentials::{CredentialStore, ProviderCredential};
pub use schema::{Config, FallbackConfig, ProviderConfig, TimeoutConfig};
