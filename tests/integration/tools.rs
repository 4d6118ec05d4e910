//! Tool invocation integration tests
//!
//! Tests for POST /v1/tools/count_tokens.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{default_server, server_with_default_provider};
use tokentally::Provider;

#[tokio::test]
async fn test_tool_reports_token_count() {
    let server = default_server();

    let response = server
        .post("/v1/tools/count_tokens")
        .json(&json!({ "text": "Hello, world!" }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({
            "content": [
                { "type": "text", "text": "The text contains 4 tokens." }
            ]
        })
    );
}

#[tokio::test]
async fn test_tool_missing_text_counts_empty() {
    let server = default_server();

    let response = server.post("/v1/tools/count_tokens").json(&json!({})).await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["content"][0]["text"], "The text contains 0 tokens.");
}

#[tokio::test]
async fn test_tool_uses_default_provider() {
    let counter = default_server();
    let claude = server_with_default_provider(Provider::Claude);
    let text = "\u{FB01}\u{FB01}\u{FB01} ligatures normalize only for claude";

    let via_count: Value = counter
        .post("/v1/tokens/count")
        .json(&json!({ "text": text, "provider": "claude" }))
        .await
        .json();
    let via_tool: Value = claude
        .post("/v1/tools/count_tokens")
        .json(&json!({ "text": text }))
        .await
        .json();

    let expected = format!(
        "The text contains {} tokens.",
        via_count["document_tokens"].as_u64().unwrap()
    );
    assert_eq!(via_tool["content"][0]["text"], expected.as_str());
}
