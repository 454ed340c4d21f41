//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional OpenAPI document at `/api-docs` and Swagger UI at `/swagger-ui/`,
//!   with `/swagger-ui.html` kept as a redirect (disable with
//!   `MULTIROUTE_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - Text-analysis routes under `/api/ai`

mod ai;
pub mod doc;
mod health;

use axum::{http::Uri, response::Redirect, routing::get, Router};
use crate::error::ServerError;
use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .merge(health::router())
        .nest("/api/ai", ai::router());

    let mut app = Router::new().merge(api_router);

    if state.config.enable_swagger {
        app = app
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs", doc::get_docs()))
            .route("/swagger-ui.html", get(|| async { Redirect::permanent("/swagger-ui/") }));
    }

    let app = app.fallback(not_found).layer(cors::cors_layer(state.clone()));
    trace::with_tracing(app).with_state(state)
}

async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_owned())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
