//! Provider listing integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    byte_level_vocabulary_file, default_server, server_with_default_provider, test_config,
    test_server,
};
use tokentally::{Config, Provider};

#[tokio::test]
async fn test_list_providers() {
    let server = default_server();
    let claude_approximate = !cfg!(feature = "bundled-claude-vocab");

    let response = server.get("/v1/providers").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({
            "object": "list",
            "data": [
                { "id": "openai", "strategy": "openai", "approximate": false, "default": true },
                {
                    "id": "claude",
                    "strategy": "claude",
                    "approximate": claude_approximate,
                    "default": false
                },
                { "id": "gemini", "strategy": "fallback", "approximate": true, "default": false },
                { "id": "other", "strategy": "fallback", "approximate": true, "default": false }
            ]
        })
    );
}

#[tokio::test]
async fn test_claude_not_approximate_with_vocabulary_file() {
    let vocabulary = byte_level_vocabulary_file();
    let server = test_server(Config {
        claude_vocab_path: Some(vocabulary.path().to_path_buf()),
        ..test_config()
    });

    let json: Value = server.get("/v1/providers").await.json();

    assert_eq!(json["data"][1]["id"], "claude");
    assert_eq!(json["data"][1]["approximate"], false);
}

#[tokio::test]
async fn test_list_providers_marks_configured_default() {
    let server = server_with_default_provider(Provider::Gemini);

    let json: Value = server.get("/v1/providers").await.json();

    let defaults: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["default"] == true)
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(defaults, vec!["gemini"]);
}
