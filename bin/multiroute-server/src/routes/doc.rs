use crate::routes::{ai, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Multi-Route LLM API",
    description = "Text analysis endpoints that route each task (classify, sentiment, \
                   summarize, intent) to its own backend model.",
    version = "1.0.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(ai::AiApi::openapi());
    root
}
