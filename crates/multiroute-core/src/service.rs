//! Task handlers: route, prompt, call, normalize.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::ChatBackend;
use crate::error::AiError;
use crate::normalize::parse_reply;
use crate::prompt::build_prompt;
use crate::router::{ModelRouter, TaskType};
use crate::types::{ClassificationResponse, IntentResponse, SentimentResponse, SummaryResponse};

/// Shared, stateless entry point for the four analysis tasks.
#[derive(Clone)]
pub struct AiService {
    backend: Arc<dyn ChatBackend>,
    router: Arc<ModelRouter>,
}

impl std::fmt::Debug for AiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiService")
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl AiService {
    pub fn new(backend: Arc<dyn ChatBackend>, router: Arc<ModelRouter>) -> Self {
        Self { backend, router }
    }

    pub async fn classify_text(&self, text: &str) -> Result<ClassificationResponse, AiError> {
        self.run(TaskType::Classify, text).await
    }

    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResponse, AiError> {
        self.run(TaskType::Sentiment, text).await
    }

    pub async fn summarize_text(&self, text: &str) -> Result<SummaryResponse, AiError> {
        self.run(TaskType::Summarize, text).await
    }

    pub async fn detect_intent(&self, text: &str) -> Result<IntentResponse, AiError> {
        self.run(TaskType::Intent, text).await
    }

    async fn run<T: DeserializeOwned>(&self, task: TaskType, text: &str) -> Result<T, AiError> {
        let model = self.router.get_model(task);
        let prompt = build_prompt(task, text);
        debug!(%task, model, text_len = text.len(), "dispatching task");

        let raw = self.backend.chat(&prompt, model).await?;
        parse_reply(&raw).inspect_err(|e| {
            warn!(%task, model, error = %e, "model reply could not be normalized");
        })
    }
}
