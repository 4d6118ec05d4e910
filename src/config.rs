//! Configuration management for Tokentally
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::tokens::counter::DEFAULT_REFERENCE_MODEL;
use crate::tokens::Provider;

/// Default request body limit. BPE cost grows faster than linearly on long
/// unbroken runs, so large bodies are rejected before any counting starts.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Provider used when a request does not name one
    pub default_provider: Provider,
    /// Reference model whose table backs the OpenAI and fallback counters
    pub reference_model: String,
    /// Claude vocabulary rank file (built-in table when unset)
    pub claude_vocab_path: Option<PathBuf>,
    /// Share loaded encoders across requests
    pub cache_encoders: bool,

    /// Maximum accepted request body size (in bytes)
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("TOKENTALLY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("TOKENTALLY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid TOKENTALLY_PORT")?,

            default_provider: env::var("TOKEN_COUNTER_DEFAULT_PROVIDER")
                .map(|v| Provider::parse(&v))
                .unwrap_or_default(),
            reference_model: env::var("TOKEN_COUNTER_REFERENCE_MODEL")
                .unwrap_or_else(|_| DEFAULT_REFERENCE_MODEL.to_string()),
            claude_vocab_path: env::var("CLAUDE_VOCAB_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            cache_encoders: env::var("TOKEN_COUNTER_CACHE_ENCODERS")
                .map(|v| parse_flag(&v))
                .unwrap_or(Ok(true))
                .context("Invalid TOKEN_COUNTER_CACHE_ENCODERS")?,

            max_body_bytes: env::var("TOKENTALLY_MAX_BODY_BYTES")
                .map(|v| v.parse())
                .unwrap_or(Ok(DEFAULT_MAX_BODY_BYTES))
                .context("Invalid TOKENTALLY_MAX_BODY_BYTES")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            default_provider: Provider::default(),
            reference_model: DEFAULT_REFERENCE_MODEL.to_string(),
            claude_vocab_path: None,
            cache_encoders: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
