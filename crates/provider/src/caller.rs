//! Primary transport first, then at most one fallback attempt.

use crate::{curl::CurlTransport, http_util::PrimaryTransport};
use farelink_config::FallbackConfig;
use farelink_types::{FarelinkError, HttpCall, Transport, traits::Result};
use serde_json::Value;
use std::sync::Arc;

/// Which primary failures are handed to the fallback transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Only failures where the provider was never reached. A provider that
    /// answered, even with an error status, is authoritative.
    TransportOnly,
    /// Any primary failure, including non-success statuses. Used for logins,
    /// where an edge rejecting the in-process client is the common case.
    AnyFailure,
}

impl FallbackPolicy {
    fn permits(self, err: &FarelinkError) -> bool {
        match self {
            Self::TransportOnly => err.triggers_fallback(),
            Self::AnyFailure => matches!(
                err,
                FarelinkError::Transport(_) | FarelinkError::Provider { .. }
            ),
        }
    }
}

/// Executes provider calls with a single, policy-gated fallback.
pub struct ResilientCaller {
    primary: Arc<dyn Transport>,
    fallback: Option<Arc<dyn Transport>>,
}

impl ResilientCaller {
    pub fn new(primary: Arc<dyn Transport>, fallback: Option<Arc<dyn Transport>>) -> Self {
        Self { primary, fallback }
    }

    /// In-process HTTP first, then `curl` unless the fallback is disabled.
    #[must_use]
    pub fn from_config(config: &FallbackConfig) -> Self {
        let fallback: Option<Arc<dyn Transport>> = config
            .enabled
            .then(|| Arc::new(CurlTransport::from_config(config)) as Arc<dyn Transport>);
        Self::new(Arc::new(PrimaryTransport::new()), fallback)
    }

    /// Executes `call` under [`FallbackPolicy::TransportOnly`].
    ///
    /// # Errors
    ///
    /// See [`ResilientCaller::call_with`].
    pub async fn call(&self, call: &HttpCall) -> Result<Value> {
        self.call_with(call, FallbackPolicy::TransportOnly).await
    }

    /// Executes `call`, retrying it once through the fallback transport when
    /// `policy` permits.
    ///
    /// # Errors
    ///
    /// Returns the primary error when fallback is not permitted or not
    /// configured, otherwise the fallback's error.
    pub async fn call_with(&self, call: &HttpCall, policy: FallbackPolicy) -> Result<Value> {
        let err = match self.primary.execute(call).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !policy.permits(&err) {
            tracing::debug!(url = %call.url, error = %err, "primary failed, not eligible for fallback");
            return Err(err);
        }
        let Some(fallback) = &self.fallback else {
            return Err(err);
        };

        tracing::warn!(
            url = %call.url,
            error = %err,
            transport = fallback.name(),
            "primary transport failed, falling back"
        );
        fallback.execute(call).await.inspect_err(|e| {
            tracing::error!(url = %call.url, error = %e, "fallback transport failed");
        })
    }
}
