use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::SharedState;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub application: String,
    pub version: String,
    pub status: String,
    pub api_base: String,
    pub endpoints: EndpointMap,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointMap {
    pub recipes: String,
    pub statistics: String,
    pub load: String,
    pub swagger: String,
}

pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(root))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Service information", body = RootResponse)
    )
)]
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RootResponse {
            application: "Skillet Recipe Catalog API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            api_base: "/api".to_string(),
            endpoints: EndpointMap {
                recipes: "/api/recipes/search".to_string(),
                statistics: "/api/recipes/statistics".to_string(),
                load: "/api/recipes/load".to_string(),
                swagger: "/swagger-ui".to_string(),
            },
        }),
    )
}

#[derive(OpenApi)]
#[openapi(paths(root), components(schemas(RootResponse, EndpointMap)))]
pub struct ApiDoc;
