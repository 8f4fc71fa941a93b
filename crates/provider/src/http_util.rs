//! Primary transport: the in-process async HTTP client.
//!
//! Classifies every outcome so the caller can decide about fallback:
//! - request never completed → [`FarelinkError::Transport`]
//! - non-2xx status → [`FarelinkError::Provider`] with the body verbatim
//! - 2xx with a body that is not JSON → [`FarelinkError::Provider`] (502)

use async_trait::async_trait;
use farelink_types::{FarelinkError, HttpCall, Transport, traits::Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("farelink/", env!("CARGO_PKG_VERSION"));

/// Status reported when a provider answers 2xx with an undecodable body.
pub const BAD_GATEWAY: u16 = 502;

/// Applies to calls that carry no timeout of their own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct PrimaryTransport {
    http: Client,
}

impl PrimaryTransport {
    /// Creates a transport with its own connection pool, bounded by
    /// [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport whose calls without a timeout give up after `timeout`.
    #[must_use]
    pub fn with_default_timeout(timeout: Duration) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| {
                tracing::warn!("HTTP client setup failed, using per-call timeouts only");
                Client::new()
            });
        Self { http }
    }

    /// Creates a transport wrapping an existing client.
    #[must_use]
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Returns a reference to the inner HTTP client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.http
    }
}

impl Default for PrimaryTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

#[async_trait]
impl Transport for PrimaryTransport {
    fn name(&self) -> &'static str {
        "primary"
    }

    async fn execute(&self, call: &HttpCall) -> Result<Value> {
        let mut builder = self.http.post(&call.url).body(serde_json::to_vec(&call.body)?);
        for (name, value) in &call.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = call.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| FarelinkError::Transport(describe(&e)))?;
        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            // The provider already answered with an error status; reading its
            // body failing does not make the call unreached.
            Err(e) if !status.is_success() => {
                return Err(FarelinkError::Provider {
                    status: status.as_u16(),
                    body: format!("failed to read provider response body: {e}"),
                });
            }
            Err(e) => return Err(FarelinkError::Transport(describe(&e))),
        };

        tracing::debug!(url = %call.url, status = status.as_u16(), "provider responded");

        if !status.is_success() {
            return Err(FarelinkError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| FarelinkError::Provider {
            status: BAD_GATEWAY,
            body: format!("provider returned {status} with a body that is not JSON ({e}): {text}"),
        })
    }
}
