//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Full health check with encoder status
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe
//! - GET /metrics - Prometheus scrape endpoint

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{
    default_server, server_with_broken_reference_model, server_with_missing_claude_vocabulary,
};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let server = default_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json: Value = response.json();

    // Verify response structure
    assert!(json.get("status").is_some(), "Response should have 'status' field");
    assert!(json.get("version").is_some(), "Response should have 'version' field");
    assert!(json.get("uptime_seconds").is_some(), "Response should have 'uptime_seconds' field");
    assert!(json.get("timestamp").is_some(), "Response should have 'timestamp' field");
    assert!(json.get("checks").is_some(), "Response should have 'checks' field");
    assert!(json.get("stats").is_some(), "Response should have 'stats' field");

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["openai"]["status"], "healthy");
    assert_eq!(json["checks"]["claude"]["status"], "healthy");
    assert_eq!(json["stats"]["default_provider"], "openai");
    assert_eq!(json["stats"]["reference_model"], "gpt-4");
}

#[tokio::test]
async fn test_health_degraded_without_claude_vocabulary() {
    let server = server_with_missing_claude_vocabulary();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["claude"]["status"], "unhealthy");
    assert!(json["checks"]["claude"]["error"].is_string());
}

#[tokio::test]
async fn test_health_unhealthy_without_reference_model() {
    let server = server_with_broken_reference_model();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["checks"]["openai"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_health_ready_endpoint() {
    let server = default_server();

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_fails_without_reference_model() {
    let server = server_with_broken_reference_model();

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_live_endpoint() {
    let server = server_with_broken_reference_model();

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    tokentally::metrics::init_metrics();
    let server = default_server();

    server
        .post("/v1/tokens/count")
        .json(&serde_json::json!({ "text": "Hello, world!" }))
        .await
        .assert_status_ok();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("tokentally_tokens_counted_total"));
}
