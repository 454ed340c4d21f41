//! Text-analysis routes nested under `/api/ai`.
//!
//! Each task endpoint forwards `text` to the model configured for that task
//! and returns the normalized result.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use multiroute_core::{ClassificationResponse, IntentResponse, SentimentResponse, SummaryResponse};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::extract::AppJson;
use crate::schemas::ai::TextRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(classify_text, analyze_sentiment, summarize_text, detect_intent, get_routes),
    components(schemas(
        TextRequest,
        ClassificationResponse,
        SentimentResponse,
        SummaryResponse,
        IntentResponse
    )),
    tags((name = "AI Text Analysis", description = "Per-task routing to backend models"))
)]
pub struct AiApi;

/// Register text-analysis routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/classify", post(classify_text))
        .route("/sentiment", post(analyze_sentiment))
        .route("/summarize", post(summarize_text))
        .route("/intent", post(detect_intent))
        .route("/routes", get(get_routes))
}

/// Classify text into labels and a primary category.
#[utoipa::path(
    post,
    path = "/api/ai/classify",
    tag = "AI Text Analysis",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Classification labels, tags, and primary category", body = ClassificationResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body is missing `text`"),
        (status = 500, description = "Backend or parse failure"),
    )
)]
pub async fn classify_text(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<ClassificationResponse>, ServerError> {
    Ok(Json(state.ai.classify_text(&req.text).await?))
}

/// Overall sentiment (positive, negative, neutral) and detected emotions.
#[utoipa::path(
    post,
    path = "/api/ai/sentiment",
    tag = "AI Text Analysis",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Sentiment analysis", body = SentimentResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body is missing `text`"),
        (status = 500, description = "Backend or parse failure"),
    )
)]
pub async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<SentimentResponse>, ServerError> {
    Ok(Json(state.ai.analyze_sentiment(&req.text).await?))
}

/// Concise summary with key points.
#[utoipa::path(
    post,
    path = "/api/ai/summarize",
    tag = "AI Text Analysis",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body is missing `text`"),
        (status = 500, description = "Backend or parse failure"),
    )
)]
pub async fn summarize_text(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<SummaryResponse>, ServerError> {
    Ok(Json(state.ai.summarize_text(&req.text).await?))
}

/// Intent behind the text (question, request, statement, command).
#[utoipa::path(
    post,
    path = "/api/ai/intent",
    tag = "AI Text Analysis",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Detected intent", body = IntentResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body is missing `text`"),
        (status = 500, description = "Backend or parse failure"),
    )
)]
pub async fn detect_intent(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<IntentResponse>, ServerError> {
    Ok(Json(state.ai.detect_intent(&req.text).await?))
}

/// Current task → model routing table.
#[utoipa::path(
    get,
    path = "/api/ai/routes",
    tag = "AI Text Analysis",
    responses(
        (status = 200, description = "Model name per task type", body = BTreeMap<String, String>)
    )
)]
pub async fn get_routes(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, String>> {
    Json(state.router.get_routes())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use multiroute_core::{AiError, ChatBackend};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Replies with a canned string and records the model of every call.
    struct FakeBackend {
        reply: String,
        models: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_owned(),
                models: Mutex::new(Vec::new()),
            })
        }

        fn models(&self) -> Vec<String> {
            self.models.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for FakeBackend {
        async fn chat(&self, _prompt: &str, model: &str) -> Result<String, AiError> {
            self.models.lock().unwrap().push(model.to_owned());
            Ok(self.reply.clone())
        }
    }

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "OLLAMA_MODEL_CLASSIFY" => Some("c-model".into()),
            "OLLAMA_MODEL_SENTIMENT" => Some("s-model".into()),
            "OLLAMA_MODEL_SUMMARIZE" => Some("z-model".into()),
            "OLLAMA_MODEL_INTENT" => Some("i-model".into()),
            _ => None,
        })
    }

    fn app(backend: Arc<FakeBackend>) -> axum::Router {
        routes::build(Arc::new(AppState::new(config(), backend)))
    }

    async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn classify_returns_typed_result() {
        let backend = FakeBackend::new(
            r#"{"labels": ["technology", "healthcare", "AI"], "primaryCategory": "technology", "confidence": 0.95}"#,
        );
        let (status, body) = post_json(
            app(backend.clone()),
            "/api/ai/classify",
            r#"{"text": "Artificial intelligence is transforming healthcare."}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"], json!(["technology", "healthcare", "AI"]));
        assert_eq!(body["primaryCategory"], "technology");
        assert_eq!(body["confidence"], 0.95);
        assert_eq!(backend.models(), vec!["c-model"]);
    }

    #[tokio::test]
    async fn sentiment_strips_fenced_reply() {
        let backend = FakeBackend::new(
            "```json\n{\"overallSentiment\": \"positive\", \"sentimentScore\": 0.85, \"emotions\": [\"joy\"], \"confidence\": 0.9}\n```",
        );
        let (status, body) =
            post_json(app(backend.clone()), "/api/ai/sentiment", r#"{"text": "I love this!"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "overallSentiment": "positive",
                "sentimentScore": 0.85,
                "emotions": ["joy"],
                "confidence": 0.9
            })
        );
        assert_eq!(backend.models(), vec!["s-model"]);
    }

    #[tokio::test]
    async fn summarize_routes_to_summarize_model() {
        let backend = FakeBackend::new(
            r#"{"summary": "A very long repetitive text.", "keyPoints": ["Contains repeated character A"], "wordCount": 5}"#,
        );
        let text = "A".repeat(10_000);
        let (status, body) = post_json(
            app(backend.clone()),
            "/api/ai/summarize",
            &json!({ "text": text }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wordCount"], 5);
        assert_eq!(backend.models(), vec!["z-model"]);
    }

    #[tokio::test]
    async fn intent_accepts_special_characters() {
        let backend = FakeBackend::new(
            r#"{"primaryIntent": "greeting", "secondaryIntents": ["test"], "intentCategory": "statement", "confidence": 0.7}"#,
        );
        let (status, body) = post_json(
            app(backend.clone()),
            "/api/ai/intent",
            &json!({ "text": "Hello! @#$%^&*() Test 123 日本語 émojis 🎉" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["primaryIntent"], "greeting");
        assert_eq!(backend.models(), vec!["i-model"]);
    }

    #[tokio::test]
    async fn empty_text_is_processed() {
        let backend = FakeBackend::new(
            r#"{"overallSentiment": "neutral", "sentimentScore": 0.0, "emotions": [], "confidence": 0.0}"#,
        );
        let (status, body) =
            post_json(app(backend), "/api/ai/sentiment", r#"{"text": ""}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overallSentiment"], "neutral");
    }

    #[tokio::test]
    async fn unparsable_reply_is_server_error() {
        let backend = FakeBackend::new("not json at all");
        for uri in [
            "/api/ai/classify",
            "/api/ai/sentiment",
            "/api/ai/summarize",
            "/api/ai/intent",
        ] {
            let (status, body) = post_json(app(backend.clone()), uri, r#"{"text": "x"}"#).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "Failed to parse AI response as JSON" }));
        }
    }

    #[tokio::test]
    async fn missing_text_is_rejected_before_backend() {
        let backend = FakeBackend::new("{}");
        let (status, body) =
            post_json(app(backend.clone()), "/api/ai/classify", r#"{"content": "x"}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
        assert!(backend.models().is_empty());
    }

    #[tokio::test]
    async fn non_string_text_is_rejected() {
        let backend = FakeBackend::new("{}");
        let (status, _) =
            post_json(app(backend.clone()), "/api/ai/intent", r#"{"text": 42}"#).await;
        assert!(status.is_client_error());
        assert!(backend.models().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let backend = FakeBackend::new("{}");
        let (status, _) =
            post_json(app(backend.clone()), "/api/ai/classify", "{ invalid json }").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(backend.models().is_empty());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_before_backend() {
        let backend = FakeBackend::new("{}");
        let body = json!({ "text": "a".repeat(3 * 1024 * 1024) }).to_string();
        let (status, body) = post_json(app(backend.clone()), "/api/ai/classify", &body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string());
        assert!(backend.models().is_empty());
    }

    #[tokio::test]
    async fn non_json_content_type_is_unsupported_media_type() {
        let backend = FakeBackend::new("{}");
        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/classify")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from("some text"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(backend.models().is_empty());
    }

    #[tokio::test]
    async fn routes_lists_configured_models() {
        let response = app(FakeBackend::new("{}"))
            .oneshot(Request::builder().uri("/api/ai/routes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "classify": "c-model",
                "sentiment": "s-model",
                "summarize": "z-model",
                "intent": "i-model"
            })
        );
    }
}
