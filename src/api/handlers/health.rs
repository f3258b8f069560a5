//! Handler for health check endpoint.

use axum::Json;
use std::sync::LazyLock;
use std::time::Instant;

use crate::api::dto::health::HealthResponse;

/// Process start, fixed the first time it is touched.
static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Pins the uptime origin. Called once at startup.
pub fn mark_process_start() {
    LazyLock::force(&STARTED_AT);
}

/// Seconds elapsed since [`mark_process_start`].
pub fn uptime_seconds() -> u64 {
    STARTED_AT.elapsed().as_secs()
}

/// Reports liveness, crate version and uptime.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response
///
/// ```json
/// { "ok": true, "version": "0.1.0", "uptime": 42 }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: uptime_seconds(),
    })
}
