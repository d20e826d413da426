use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::schema::recipes;
use crate::SharedState;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_recipes: i64,
    pub cuisine_distribution: BTreeMap<String, i64>,
    pub difficulty_distribution: BTreeMap<String, i64>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/statistics",
    tag = "recipes",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = StatisticsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn recipe_statistics(State(state): State<SharedState>) -> impl IntoResponse {
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

    let result = (|| -> QueryResult<StatisticsResponse> {
        let total_recipes: i64 = recipes::table.count().get_result(&mut conn)?;

        let cuisine_counts: Vec<(String, i64)> = recipes::table
            .group_by(recipes::cuisine)
            .select((recipes::cuisine, count_star()))
            .load(&mut conn)?;

        let difficulty_counts: Vec<(String, i64)> = recipes::table
            .group_by(recipes::difficulty)
            .select((recipes::difficulty, count_star()))
            .load(&mut conn)?;

        Ok(StatisticsResponse {
            total_recipes,
            cuisine_distribution: cuisine_counts.into_iter().collect(),
            difficulty_distribution: difficulty_counts.into_iter().collect(),
        })
    })();

    match result {
        Ok(statistics) => (StatusCode::OK, Json(statistics)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "statistics query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to compute statistics")),
            )
                .into_response()
        }
    }
}
