//! Common test utilities for Tokentally
//!
//! Shared fixtures for building a test server over the real router.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokentally::{routes::create_router, AppState, Config, Provider};

/// Config with the same defaults as production
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    }
}

/// Build a test server for the given configuration
pub fn test_server(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Test server with default configuration
pub fn default_server() -> TestServer {
    test_server(test_config())
}

/// Test server whose default provider is `provider`
pub fn server_with_default_provider(provider: Provider) -> TestServer {
    test_server(Config {
        default_provider: provider,
        ..test_config()
    })
}

/// Test server whose reference model cannot be loaded
pub fn server_with_broken_reference_model() -> TestServer {
    test_server(Config {
        reference_model: "no-such-reference-model".to_string(),
        ..test_config()
    })
}

/// Test server whose Claude vocabulary points at a missing file
pub fn server_with_missing_claude_vocabulary() -> TestServer {
    test_server(Config {
        claude_vocab_path: Some(PathBuf::from("/nonexistent/claude.tiktoken")),
        ..test_config()
    })
}

/// Write a byte-level rank file: every byte is one token, no merges
pub fn byte_level_vocabulary_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    for b in 0u8..=255 {
        writeln!(file, "{} {}", STANDARD.encode([b]), b).expect("Failed to write vocabulary");
    }
    file
}
