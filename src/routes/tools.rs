//! Language-model tool invocation
//!
//! `POST /v1/tools/count_tokens` lets a model ask how many tokens a piece of
//! text contains, counted with the configured default provider.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{error::AppResult, metrics::record_request, AppState};

/// Tool name advertised to language models
pub const COUNT_TOKENS_TOOL: &str = "count_tokens";

/// Tool input
#[derive(Debug, Default, Deserialize)]
pub struct CountTokensToolInput {
    #[serde(default)]
    pub text: Option<String>,
}

/// A single result part
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolResultPart {
    Text { text: String },
}

/// Tool result
#[derive(Debug, Serialize, PartialEq)]
pub struct ToolResult {
    pub content: Vec<ToolResultPart>,
}

impl ToolResult {
    fn token_count(count: usize) -> Self {
        Self {
            content: vec![ToolResultPart::Text {
                text: format!("The text contains {} tokens.", count),
            }],
        }
    }
}

/// Invoke the token counting tool
pub async fn count_tokens_tool(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CountTokensToolInput>, JsonRejection>,
) -> AppResult<Json<ToolResult>> {
    let Json(input) = payload?;
    record_request("/v1/tools/count_tokens");

    let text = input.text.unwrap_or_default();
    let service = Arc::clone(&state.token_service);

    let count = tokio::task::spawn_blocking(move || service.count_tokens_default(&text))
        .await
        .map_err(|e| anyhow::anyhow!("Token counting task failed: {}", e))?;

    tracing::debug!(tool = COUNT_TOKENS_TOOL, count, "Tool invocation complete");

    Ok(Json(ToolResult::token_count(count)))
}
