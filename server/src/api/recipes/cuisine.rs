use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::recipes::dto::{RecipeDto, RecipePage};
use crate::api::recipes::search::{escape_like, resolve_page_params};
use crate::api::ErrorResponse;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CuisineParams {
    /// Page number, 0-based (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20, max: 100)
    pub size: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/cuisine/{cuisine}",
    tag = "recipes",
    params(
        ("cuisine" = String, Path, description = "Cuisine type"),
        CuisineParams
    ),
    responses(
        (status = 200, description = "Recipes for the cuisine", body = RecipePage),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn recipes_by_cuisine(
    State(state): State<SharedState>,
    Path(cuisine): Path<String>,
    Query(params): Query<CuisineParams>,
) -> impl IntoResponse {
    let cuisine = cuisine.trim().to_string();
    if cuisine.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Cuisine must not be blank")),
        )
            .into_response();
    }

    let (page, size) = match resolve_page_params(params.page, params.size) {
        Ok(resolved) => resolved,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::validation(errors)))
                .into_response()
        }
    };

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

    let pattern = format!("%{}%", escape_like(&cuisine));

    let rows: Vec<(Recipe, i64)> = match recipes::table
        .filter(recipes::cuisine.ilike(&pattern))
        .order(recipes::name.asc())
        .then_order_by(recipes::id.asc())
        .select((Recipe::as_select(), sql::<BigInt>("COUNT(*) OVER()")))
        .limit(size)
        .offset(page * size)
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(cuisine, error = %e, "cuisine query failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipes")),
            )
                .into_response();
        }
    };

    let total = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let content: Vec<RecipeDto> = rows
        .into_iter()
        .map(|(recipe, _)| RecipeDto::from(recipe))
        .collect();

    (
        StatusCode::OK,
        Json(RecipePage::new(content, page, size, total)),
    )
        .into_response()
}
