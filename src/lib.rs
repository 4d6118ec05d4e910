//! Tokentally - provider-aware token counting
//!
//! This library counts tokens in text the way a chosen language-model
//! provider's tokenizer would, and serves those counts over HTTP.

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod tokens;

use std::sync::Arc;
use std::time::Instant;

pub use crate::config::Config;
pub use crate::tokens::{count_tokens, count_tokens_for, Provider, TokenCountingService};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Token counter configured from `config`
    pub token_service: Arc<TokenCountingService>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        let token_service = Arc::new(TokenCountingService::from_config(&config));

        Self {
            config,
            start_time: Instant::now(),
            token_service,
        }
    }
}
