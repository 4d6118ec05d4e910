//! Provider listing endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    tokens::{resolve, Provider},
    AppState,
};

/// Provider entry
#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub id: Provider,
    pub strategy: &'static str,
    pub approximate: bool,
    pub default: bool,
}

/// Provider list response
#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub object: String,
    pub data: Vec<ProviderInfo>,
}

/// List supported providers and the strategy each resolves to
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    let service = &state.token_service;
    let default_provider = service.default_provider();

    let data = Provider::ALL
        .iter()
        .map(|provider| ProviderInfo {
            id: *provider,
            strategy: resolve(*provider).name(),
            approximate: service.is_approximate(*provider),
            default: *provider == default_provider,
        })
        .collect();

    Json(ProvidersResponse {
        object: "list".to_string(),
        data,
    })
}
