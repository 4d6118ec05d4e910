//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with encoder status
//! - `/health/ready` - Readiness probe
//! - `/health/live` - Liveness probe

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::tokens::{CounterStrategy, TokenCountingService};
use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual encoder check result
#[derive(Debug, Serialize)]
pub struct EncoderCheck {
    pub status: HealthStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Encoder checks collection
#[derive(Debug, Serialize)]
pub struct EncoderChecks {
    /// Table behind the OpenAI and fallback counters
    pub openai: EncoderCheck,
    /// Claude vocabulary
    pub claude: EncoderCheck,
}

impl EncoderChecks {
    /// The reference table is required; the Claude table only degrades
    fn overall_status(&self) -> HealthStatus {
        if self.openai.status == HealthStatus::Unhealthy {
            HealthStatus::Unhealthy
        } else if self.claude.status == HealthStatus::Unhealthy {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Application statistics
#[derive(Debug, Serialize)]
pub struct HealthStats {
    pub uptime_seconds: u64,
    pub default_provider: String,
    pub reference_model: String,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub checks: EncoderChecks,
    pub stats: HealthStats,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

fn check_encoder(service: &TokenCountingService, strategy: CounterStrategy) -> EncoderCheck {
    let start = Instant::now();

    match service.check_encoder(strategy) {
        Ok(()) => EncoderCheck {
            status: HealthStatus::Healthy,
            latency_ms: start.elapsed().as_millis() as u64,
            error: None,
        },
        Err(e) => EncoderCheck {
            status: HealthStatus::Unhealthy,
            latency_ms: start.elapsed().as_millis() as u64,
            error: Some(e.to_string()),
        },
    }
}

/// Load both encoder tables off the async runtime
async fn check_encoders(state: &AppState) -> EncoderChecks {
    let service = Arc::clone(&state.token_service);

    let checks = tokio::task::spawn_blocking(move || EncoderChecks {
        openai: check_encoder(&service, CounterStrategy::SchemeA),
        claude: check_encoder(&service, CounterStrategy::VendorC),
    })
    .await;

    checks.unwrap_or_else(|e| {
        let failed = || EncoderCheck {
            status: HealthStatus::Unhealthy,
            latency_ms: 0,
            error: Some(format!("Encoder check task failed: {}", e)),
        };
        EncoderChecks {
            openai: failed(),
            claude: failed(),
        }
    })
}

/// Full health check endpoint
///
/// Returns comprehensive health information including:
/// - Overall status
/// - Version info
/// - Uptime
/// - Encoder checks
/// - Application stats
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let checks = check_encoders(&state).await;
    let overall_status = checks.overall_status();

    let uptime = state.start_time.elapsed().as_secs();

    let response = HealthResponse {
        status: overall_status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
        stats: HealthStats {
            uptime_seconds: uptime,
            default_provider: state.token_service.default_provider().to_string(),
            reference_model: state.token_service.settings().reference_model.clone(),
        },
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Readiness probe endpoint
///
/// Returns 200 OK once the reference encoder can be loaded.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    if check_encoders(&state).await.overall_status() == HealthStatus::Unhealthy {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse {
                status: HealthStatus::Unhealthy,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness probe endpoint
///
/// Returns 200 OK if the application is alive.
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
