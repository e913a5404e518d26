//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when MongoDB answers a ping, 503 otherwise
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let db_name = state.config.mongodb.database();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async {
            let status = database::mongodb::check_health_detailed(&state.mongo_client, db_name).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
            match status.message {
                None if status.healthy => Ok(()),
                message => Err(message.unwrap_or_else(|| "ping failed".to_string())),
            }
        }),
    )];

    run_health_checks(checks).await
}
