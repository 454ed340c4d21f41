//! Liveness check. Answers from local state only; the model backend is never
//! contacted, so a slow or missing backend does not fail the check.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health), components(schemas(HealthStatus)))]
pub struct HealthApi;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
    /// `APP_NAME` of this instance.
    #[schema(example = "llm-multiroute")]
    pub name: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthStatus))
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
        name: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}
