//! Per-request tracing.
//!
//! Every request gets a trace id: the caller's `x-trace-id` header when
//! present, otherwise a fresh UUIDv4. The id keys the `http_request` span and
//! is echoed on the response. Bodies are never buffered here, so axum's body
//! limit stays the only place a request body is read.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Request};
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span, info_span};
use uuid::Uuid;

pub const X_TRACE_ID: &str = "x-trace-id";

/// Issues a UUIDv4 trace id for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewTraceId;

impl MakeRequestId for NewTraceId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Opens the `http_request` span from the already assigned trace id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceIdSpan;

impl<B> MakeSpan<B> for TraceIdSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let trace_id = request
            .headers()
            .get(X_TRACE_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info_span!(
            "http_request",
            trace_id,
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Wrap `router` so the trace id is assigned before the span opens and copied
/// to the response afterwards.
pub fn with_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let header = HeaderName::from_static(X_TRACE_ID);
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(header.clone(), NewTraceId))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(TraceIdSpan)
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(header)),
    )
}
