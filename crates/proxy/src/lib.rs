//! HTTP layer: axum router, route handlers, and error mapping.
//!
//! A thin surface over the provider access layer. Handlers resolve the
//! provider named in the path, hand the canonical request to its client,
//! and return the provider's JSON unchanged.

mod error;
mod flights;

pub use error::ApiError;

use axum::{
    Json, Router,
    routing::{get, post},
};
use farelink_provider::ProviderSet;
use farelink_types::{FarelinkError, FlightProvider, ProviderId};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state passed to all route handlers.
pub struct AppState {
    /// Clients of the enabled providers. Known providers missing from the
    /// map are disabled.
    pub providers: ProviderSet,
}

impl AppState {
    /// Creates a new shared application state wrapped in an `Arc`.
    pub fn new(providers: ProviderSet) -> Arc<Self> {
        Arc::new(Self { providers })
    }

    /// Resolves a provider name from the request path.
    ///
    /// # Errors
    ///
    /// Unknown names are 404; known but disabled providers are 503.
    pub fn provider(&self, name: &str) -> Result<Arc<dyn FlightProvider>, ApiError> {
        let id: ProviderId = name.parse().map_err(|_| ApiError::unknown_provider(name))?;
        self.providers
            .get(&id)
            .cloned()
            .ok_or_else(|| FarelinkError::ProviderUnavailable(id).into())
    }
}

/// Build the full axum router.
///
/// Routes:
/// - GET  /
/// - POST /api/{provider}/search
/// - POST /api/{provider}/offerprice
/// - GET  /api/{provider}/balance
pub fn make_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/{provider}/search", post(flights::search))
        .route("/api/{provider}/offerprice", post(flights::offer_price))
        .route("/api/{provider}/balance", get(flights::balance))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Travel API!" }))
}
