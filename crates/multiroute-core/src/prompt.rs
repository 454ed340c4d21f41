//! Per-task instruction prompts.
//!
//! Each prompt ends with a literal JSON example; that example is the only
//! schema the model ever sees, so it must match the result structs in
//! [`crate::types`] field for field.

use crate::router::TaskType;

const JSON_ONLY: &str = "Respond with ONLY valid JSON, no additional text or explanation.";

fn directive(task: TaskType) -> &'static str {
    match task {
        TaskType::Classify => {
            "Analyze the following text and classify it with appropriate labels and tags."
        }
        TaskType::Sentiment => "Analyze the sentiment of the following text.",
        TaskType::Summarize => "Summarize the following text concisely.",
        TaskType::Intent => "Detect the intent behind the following text.",
    }
}

fn example(task: TaskType) -> &'static str {
    match task {
        TaskType::Classify => {
            r#"{"labels": ["label1", "label2"], "primaryCategory": "category", "confidence": 0.9}"#
        }
        TaskType::Sentiment => {
            r#"{"overallSentiment": "positive", "sentimentScore": 0.8, "emotions": ["joy", "excitement"], "confidence": 0.9}"#
        }
        TaskType::Summarize => {
            r#"{"summary": "your summary here", "keyPoints": ["point1", "point2", "point3"], "wordCount": 25}"#
        }
        TaskType::Intent => {
            r#"{"primaryIntent": "main_intent", "secondaryIntents": ["intent1", "intent2"], "intentCategory": "question", "confidence": 0.9}"#
        }
    }
}

/// Build the instruction prompt sent to the backend for `task` over `text`.
pub fn build_prompt(task: TaskType, text: &str) -> String {
    format!(
        "{} {}\n\nText: {text}\n\nReturn JSON in this exact format:\n{}",
        directive(task),
        JSON_ONLY,
        example(task),
    )
}
