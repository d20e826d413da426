use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;

use crate::api::recipes::dto::RecipeDto;
use crate::api::ErrorResponse;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDto),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    if id <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Recipe ID must be positive")),
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

    let recipe: Recipe = match recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::NotFound) => {
            tracing::debug!(id, "recipe not found");
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recipe not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(id, error = %e, "failed to fetch recipe");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipe")),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(RecipeDto::from(recipe))).into_response()
}
