//! JSON extractor whose rejection is a [`ServerError`].
//!
//! Malformed bodies are answered before the handler runs: 400 for broken
//! JSON, 415 for a missing `application/json` content type, 422 when the
//! body does not fit the request type.

use axum::extract::FromRequest;

use crate::error::ServerError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct AppJson<T>(pub T);
