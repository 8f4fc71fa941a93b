//! Flight search and offer pricing handlers.
//!
//! Both accept the canonical request shape and return the provider's JSON
//! without reshaping it.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use farelink_types::{FlightSearchRequest, OfferPriceRequest};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{AppState, error::ApiError};

/// Handles `POST /api/{provider}/search`.
///
/// # Errors
///
/// Returns [`ApiError`] if the provider is unknown or unavailable, the body is
/// invalid, or the provider call fails.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let client = state.provider(&provider)?;
    let Json(request) = payload?;
    let result = client.search(&request).await?;
    Ok(Json(result))
}

/// Handles `POST /api/{provider}/offerprice`.
///
/// Wraps the provider reply as `{"success": true, "data": ...}`.
///
/// # Errors
///
/// Returns [`ApiError`] if the provider is unknown or unavailable, the body is
/// invalid, or the provider call fails.
pub async fn offer_price(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    payload: Result<Json<OfferPriceRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let client = state.provider(&provider)?;
    let Json(request) = payload?;
    let data = client.price(&request).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// Handles `GET /api/{provider}/balance`.
///
/// # Errors
///
/// Returns [`ApiError`] if the provider is unknown or unavailable or the
/// provider call fails.
pub async fn balance(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let client = state.provider(&provider)?;
    Ok(Json(client.balance().await?))
}
