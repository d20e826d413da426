use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::schema::recipes;
use crate::SharedState;

/// Live loader status: gate snapshot plus a fresh storage count.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatusResponse {
    pub is_loading: bool,
    pub last_load_time: Option<DateTime<Utc>>,
    pub last_load_count: i64,
    pub last_load_status: String,
    pub total_recipes_in_database: i64,
}

#[utoipa::path(
    get,
    path = "/api/recipes/load/status",
    tag = "load",
    responses(
        (status = 200, description = "Status retrieved successfully", body = LoadStatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn load_status(State(state): State<SharedState>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Database connection failed")),
            )
                .into_response()
        }
    };

    // Always queried fresh, independent of load history.
    let total: i64 = match recipes::table.count().get_result(&mut conn) {
        Ok(total) => total,
        Err(e) => {
            tracing::error!(error = %e, "recipe count query failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read loading status")),
            )
                .into_response();
        }
    };

    let snapshot = state.loader.snapshot();

    (
        StatusCode::OK,
        Json(LoadStatusResponse {
            is_loading: snapshot.is_busy,
            last_load_time: snapshot.last_load_time,
            last_load_count: snapshot.last_load_count,
            last_load_status: snapshot.last_load_status,
            total_recipes_in_database: total,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_field_names() {
        let value = serde_json::to_value(LoadStatusResponse {
            is_loading: false,
            last_load_time: None,
            last_load_count: 0,
            last_load_status: "Never loaded".to_string(),
            total_recipes_in_database: 0,
        })
        .unwrap();

        assert_eq!(value["isLoading"], false);
        assert!(value["lastLoadTime"].is_null());
        assert_eq!(value["lastLoadCount"], 0);
        assert_eq!(value["lastLoadStatus"], "Never loaded");
        assert_eq!(value["totalRecipesInDatabase"], 0);
    }
}
