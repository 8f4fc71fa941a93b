//! Async traits shared across all farelink crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `farelink-types`, not on each other.

use crate::{FarelinkError, FlightSearchRequest, OfferPriceRequest, ProviderId};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, time::Duration, time::Instant};

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FarelinkError>;

/// Header names whose values must never appear in logs or debug output.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "x-api-key"];

/// One logical provider call: a JSON `POST` to `url`.
///
/// Both transports consume the same value, so a fallback attempt re-issues
/// exactly what the primary attempt sent.
#[derive(Clone)]
pub struct HttpCall {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    /// Upper bound for the whole call. `None` falls back to the transport's
    /// own finite limit; no transport waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpCall {
    /// A JSON `POST` to `url` with `Content-Type: application/json` preset.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body,
            timeout: None,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for HttpCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if SENSITIVE_HEADERS.contains(&k.to_ascii_lowercase().as_str()) {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpCall")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A way of executing an [`HttpCall`] and decoding the JSON reply.
///
/// Implementations must classify failures: [`FarelinkError::Transport`] when
/// the provider was never reached, [`FarelinkError::Provider`] when it
/// answered with a non-success status, [`FarelinkError::Fallback`] for
/// subprocess-level failures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logs (`"primary"`, `"curl"`).
    fn name(&self) -> &'static str;

    /// Execute the call and return the decoded JSON body.
    async fn execute(&self, call: &HttpCall) -> Result<Value>;
}

/// Exchanges static credentials for a bearer token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The provider this authenticator logs in to.
    fn provider(&self) -> ProviderId;

    /// Perform the login call and return the raw token identifier.
    async fn authenticate(&self) -> Result<String>;
}

/// Translates a canonical request into a provider's native payload.
///
/// Implementations must be pure (no I/O).
pub trait RequestTranslator<Req>: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FarelinkError::Validation`] if the request is malformed or
    /// cannot be expressed in the provider's dialect.
    fn translate(&self, req: &Req) -> Result<Value>;
}

/// The per-provider service surface called by route handlers.
///
/// Every method returns the provider's decoded JSON unchanged.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn search(&self, request: &FlightSearchRequest) -> Result<Value>;

    async fn price(&self, request: &OfferPriceRequest) -> Result<Value>;

    async fn balance(&self) -> Result<Value>;
}

/// Source of monotonic time. Injected so token expiry can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
