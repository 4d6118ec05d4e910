//! Token counting endpoint
//!
//! `POST /v1/tokens/count` counts a document and, optionally, a selected
//! range of it. Counting failures surface as a count of 0, never as an error
//! response.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    metrics::record_request,
    tokens::{CountReport, Provider, TextSelection},
    AppState,
};

/// Count request body
#[derive(Debug, Deserialize)]
pub struct CountTokensRequest {
    /// Full document text
    #[serde(default)]
    pub text: String,
    /// Provider identifier; the configured default when omitted
    #[serde(default)]
    pub provider: Option<Provider>,
    /// Selected range, in character offsets
    #[serde(default)]
    pub selection: Option<TextSelection>,
}

/// Count tokens in a document and its selection
pub async fn count_tokens(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CountTokensRequest>, JsonRejection>,
) -> AppResult<Json<CountReport>> {
    let Json(request) = payload?;
    record_request("/v1/tokens/count");

    let service = Arc::clone(&state.token_service);
    let provider = request
        .provider
        .unwrap_or_else(|| service.default_provider());

    tracing::debug!(
        provider = %provider,
        text_bytes = request.text.len(),
        has_selection = request.selection.is_some(),
        "Counting tokens"
    );

    let report = tokio::task::spawn_blocking(move || {
        service.count_document(&request.text, request.selection, provider)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Token counting task failed: {}", e))?;

    Ok(Json(report))
}
