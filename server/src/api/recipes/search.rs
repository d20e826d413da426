use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::api::recipes::dto::{RecipeDto, RecipePage};
use crate::api::ErrorResponse;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;

/// Sort field for recipe search
#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Sort by recipe name
    #[default]
    Name,
    /// Sort by cuisine
    Cuisine,
    /// Sort by rating
    Rating,
    /// Sort by creation time
    CreatedAt,
    /// Sort by update time
    UpdatedAt,
}

/// Sort direction
#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending (default)
    #[default]
    Asc,
    /// Descending
    Desc,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against recipe name and cuisine.
    /// Blank or absent returns all recipes.
    pub q: Option<String>,
    /// Page number, 0-based (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20, max: 100)
    pub size: Option<i64>,
    /// Sort field (default: name)
    #[serde(default)]
    pub sort: SortBy,
    /// Sort direction (default: asc)
    #[serde(default)]
    pub direction: Direction,
}

/// Resolve and validate pagination parameters shared by the paginated
/// endpoints. Returns per-field messages on violation.
pub fn resolve_page_params(
    page: Option<i64>,
    size: Option<i64>,
) -> Result<(i64, i64), BTreeMap<String, String>> {
    let page = page.unwrap_or(0);
    let size = size.unwrap_or(20);

    let mut errors = BTreeMap::new();
    if page < 0 {
        errors.insert("page".to_string(), "must be 0 or greater".to_string());
    }
    if !(1..=100).contains(&size) {
        errors.insert("size".to_string(), "must be between 1 and 100".to_string());
    }

    if errors.is_empty() {
        Ok((page, size))
    } else {
        Err(errors)
    }
}

/// Escape ILIKE metacharacters so user input only ever matches literally.
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Search completed successfully", body = RecipePage),
        (status = 400, description = "Invalid search parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let (page, size) = match resolve_page_params(params.page, params.size) {
        Ok(resolved) => resolved,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::validation(errors)))
                .into_response()
        }
    };

    let pattern = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(q)));

    tracing::debug!(
        query = params.q.as_deref().unwrap_or(""),
        page,
        size,
        "searching recipes"
    );

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

    let mut query = recipes::table.into_boxed();

    if let Some(ref pattern) = pattern {
        query = query.filter(
            recipes::name
                .ilike(pattern)
                .or(recipes::cuisine.ilike(pattern)),
        );
    }

    let query = match (params.sort, params.direction) {
        (SortBy::Name, Direction::Asc) => query.order(recipes::name.asc()),
        (SortBy::Name, Direction::Desc) => query.order(recipes::name.desc()),
        (SortBy::Cuisine, Direction::Asc) => query.order(recipes::cuisine.asc()),
        (SortBy::Cuisine, Direction::Desc) => query.order(recipes::cuisine.desc()),
        (SortBy::Rating, Direction::Asc) => query.order(recipes::rating.asc()),
        (SortBy::Rating, Direction::Desc) => query.order(recipes::rating.desc()),
        (SortBy::CreatedAt, Direction::Asc) => query.order(recipes::created_at.asc()),
        (SortBy::CreatedAt, Direction::Desc) => query.order(recipes::created_at.desc()),
        (SortBy::UpdatedAt, Direction::Asc) => query.order(recipes::updated_at.asc()),
        (SortBy::UpdatedAt, Direction::Desc) => query.order(recipes::updated_at.desc()),
    }
    // Stable tie-break so no row moves between pages mid-pagination.
    .then_order_by(recipes::id.asc());

    // COUNT(*) OVER() carries the total matching count on every row.
    let rows: Vec<(Recipe, i64)> = match query
        .select((Recipe::as_select(), sql::<BigInt>("COUNT(*) OVER()")))
        .limit(size)
        .offset(page * size)
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "recipe search query failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to search recipes")),
            )
                .into_response()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_handles_metacharacters() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("pasta"), "pasta");
    }

    #[test]
    fn test_resolve_page_params_defaults() {
        assert_eq!(resolve_page_params(None, None).unwrap(), (0, 20));
    }

    #[test]
    fn test_resolve_page_params_rejects_negative_page() {
        let errors = resolve_page_params(Some(-1), None).unwrap_err();
        assert!(errors.contains_key("page"));
    }

    #[test]
    fn test_resolve_page_params_rejects_out_of_range_size() {
        assert!(resolve_page_params(None, Some(0))
            .unwrap_err()
            .contains_key("size"));
        assert!(resolve_page_params(None, Some(101))
            .unwrap_err()
            .contains_key("size"));
        assert!(resolve_page_params(None, Some(100)).is_ok());
    }
}
