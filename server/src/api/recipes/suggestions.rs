use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::recipes::search::escape_like;
use crate::api::ErrorResponse;
use crate::schema::recipes;
use crate::SharedState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionsParams {
    /// Partial search query, at least 2 characters
    pub q: Option<String>,
    /// Maximum number of suggestions (default: 10, max: 20)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/suggestions",
    tag = "recipes",
    params(SuggestionsParams),
    responses(
        (status = 200, description = "Suggestions retrieved successfully", body = SuggestionsResponse),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn search_suggestions(
    State(state): State<SharedState>,
    Query(params): Query<SuggestionsParams>,
) -> impl IntoResponse {
    let query = params.q.as_deref().map(str::trim).unwrap_or("");
    if query.chars().count() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Query must be at least 2 characters long",
            )),
        )
            .into_response();
    }

    let limit = params.limit.unwrap_or(10);
    if !(1..=20).contains(&limit) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Limit must be between 1 and 20")),
        )
            .into_response();
    }

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

    let pattern = format!("%{}%", escape_like(query));

    let suggestions: Vec<String> = match recipes::table
        .filter(recipes::name.ilike(&pattern))
        .select(recipes::name)
        .distinct()
        .order(recipes::name.asc())
        .limit(limit)
        .load(&mut conn)
    {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(error = %e, "suggestions query failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch suggestions")),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(SuggestionsResponse { suggestions })).into_response()
}
