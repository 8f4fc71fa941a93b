//! Unified error type for the farelink workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across farelink crates.
#[derive(Debug, Error)]
pub enum FarelinkError {
    /// Invalid configuration (bad YAML, unknown keys, malformed values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Required credentials are missing or empty for an enabled provider.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    /// The canonical request could not be translated into a provider dialect.
    #[error("validation error: {0}")]
    Validation(String),

    /// The primary transport could not complete the call (timeout, connect, DNS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream provider answered with a non-success status.
    #[error("provider error: status={status}, body={body}")]
    Provider { status: u16, body: String },

    /// The fallback transport exited non-zero or produced non-JSON output.
    #[error("fallback transport error: {0}")]
    Fallback(String),

    /// The provider login could not produce a usable token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The requested provider is disabled or has no credentials.
    #[error("provider not available: {0}")]
    ProviderUnavailable(crate::ProviderId),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FarelinkError {
    /// Returns the HTTP-style status code surfaced to callers.
    ///
    /// Provider errors forward the upstream status verbatim.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Transport(_) => 502,
            Self::Provider { status, .. } => *status,
            Self::ProviderUnavailable(_) => 503,
            Self::Config(_)
            | Self::MissingCredentials(_)
            | Self::Fallback(_)
            | Self::Auth(_)
            | Self::Serialization(_) => 500,
        }
    }

    /// Returns `true` if the error means the call never reached the provider,
    /// so re-issuing it over a different transport may succeed.
    #[must_use]
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::MissingCredentials(_) => "configuration_error",
            Self::Validation(_) => "validation_error",
            Self::Transport(_) => "transport_error",
            Self::Provider { .. } => "provider_error",
            Self::Fallback(_) => "fallback_transport_error",
            Self::Auth(_) => "authentication_error",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FarelinkError>;
