use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::db::SleepLogRepo;
use crate::AppState;

/// GET /health — process liveness only; never touches the database.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /readyz — ready once the `sleep_log` table can be read.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match SleepLogRepo::check_table(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "sleep_log": "ok" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "sleep_log": "Could not connect to database or tables are missing.",
                })),
            )
        }
    }
}
