pub mod status;
pub mod trigger;

use crate::SharedState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the load endpoints (mounted at /api/recipes)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/load", post(trigger::trigger_load))
        .route("/load/status", get(status::load_status))
}

#[derive(OpenApi)]
#[openapi(
    paths(trigger::trigger_load, status::load_status),
    components(schemas(
        trigger::LoadAcceptedResponse,
        trigger::LoadRejectedResponse,
        status::LoadStatusResponse,
    ))
)]
pub struct ApiDoc;
