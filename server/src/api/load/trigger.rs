use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::loader;
use crate::SharedState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoadAcceptedResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoadRejectedResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/load",
    tag = "load",
    responses(
        (status = 202, description = "Data loading initiated", body = LoadAcceptedResponse),
        (status = 409, description = "Loading already in progress", body = LoadRejectedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn trigger_load(State(state): State<SharedState>) -> impl IntoResponse {
    tracing::info!("recipe loading request received");

    if state.loader.is_busy() {
        tracing::warn!("recipe loading already in progress");
        return (
            StatusCode::CONFLICT,
            Json(LoadRejectedResponse {
                message: "Recipe loading is already in progress".to_string(),
                timestamp: Utc::now(),
            }),
        )
            .into_response();
    }

    let pool = state.pool.clone();
    let api = Arc::clone(&state.api);
    let gate = Arc::clone(&state.loader);

    // Fire and forget; the outcome is only observable via the status
    // endpoint. The gate inside run_load is the authoritative guard.
    tokio::spawn(async move {
        let result = loader::run_load(pool, api, gate).await;
        tracing::debug!(
            success = result.success,
            count = result.count,
            message = %result.message,
            "load attempt finished"
        );
    });

    (
        StatusCode::ACCEPTED,
        Json(LoadAcceptedResponse {
            message: "Recipe loading initiated".to_string(),
            timestamp: Utc::now(),
            status: "in_progress".to_string(),
        }),
    )
        .into_response()
}
