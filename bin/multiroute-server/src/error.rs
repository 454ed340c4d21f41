//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON body of the form
//! `{"error": "..."}` with an appropriate status code.
//!
//! Backend and parse failures are logged with full detail (including the raw
//! model reply) but the client only receives a short message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use multiroute_core::AiError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// All errors that can occur in the multiroute-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the routing / backend / normalization pipeline.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// The request body was not acceptable JSON for the endpoint.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// No route matches the request path.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::InvalidBody(rejection) => {
                warn!(status = rejection.status().as_u16(), error = %rejection, "rejected request body");
                (rejection.status(), rejection.body_text())
            }
            ServerError::NotFound(path) => (StatusCode::NOT_FOUND, format!("no route for {path}")),

            // Internal errors: log everything, answer with a category only.
            ServerError::Ai(AiError::Parse { raw, source }) => {
                error!(error = %source, raw_reply = %raw, "model reply could not be parsed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse AI response as JSON".to_owned(),
                )
            }
            ServerError::Ai(AiError::Timeout { model }) => {
                error!(%model, "model backend timed out");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "model backend timed out".to_owned(),
                )
            }
            ServerError::Ai(e) => {
                error!(error = ?e, "model backend request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "model backend request failed".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
