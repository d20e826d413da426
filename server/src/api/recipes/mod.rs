pub mod cuisine;
pub mod dto;
pub mod get;
pub mod search;
pub mod statistics;
pub mod suggestions;
pub mod top_rated;

use crate::SharedState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/search", get(search::search_recipes))
        .route("/suggestions", get(suggestions::search_suggestions))
        .route("/statistics", get(statistics::recipe_statistics))
        .route("/top-rated", get(top_rated::top_rated_recipes))
        .route("/cuisine/{cuisine}", get(cuisine::recipes_by_cuisine))
        .route("/{id}", get(get::get_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        search::search_recipes,
        get::get_recipe,
        cuisine::recipes_by_cuisine,
        top_rated::top_rated_recipes,
        suggestions::search_suggestions,
        statistics::recipe_statistics,
    ),
    components(schemas(
        dto::RecipeDto,
        dto::RecipePage,
        dto::PageMeta,
        search::SortBy,
        search::Direction,
        suggestions::SuggestionsResponse,
        statistics::StatisticsResponse,
    ))
)]
pub struct ApiDoc;
