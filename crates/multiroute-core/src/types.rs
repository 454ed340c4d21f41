//! Typed result shapes returned to callers.
//!
//! Field names follow the public JSON contract (camelCase). Values are passed
//! through as the model produced them; ranges are not checked. Numeric fields
//! decode leniently (see `lenient`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of `POST /api/ai/classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    /// Labels and tags assigned to the text.
    #[schema(example = json!(["technology", "healthcare", "AI"]))]
    pub labels: Vec<String>,
    /// Primary category of the text.
    #[schema(example = "technology")]
    pub primary_category: String,
    /// Confidence score, nominally 0.0 to 1.0.
    #[schema(example = 0.95)]
    #[serde(deserialize_with = "lenient::float")]
    pub confidence: f64,
}

/// Result of `POST /api/ai/sentiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResponse {
    /// `positive`, `negative` or `neutral`.
    #[schema(example = "positive")]
    pub overall_sentiment: String,
    /// Sentiment score, nominally -1.0 to 1.0.
    #[schema(example = 0.85)]
    #[serde(deserialize_with = "lenient::float")]
    pub sentiment_score: f64,
    #[schema(example = json!(["joy", "excitement"]))]
    pub emotions: Vec<String>,
    #[schema(example = 0.92)]
    #[serde(deserialize_with = "lenient::float")]
    pub confidence: f64,
}

/// Result of `POST /api/ai/summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[schema(example = "This article discusses the impact of AI on healthcare...")]
    pub summary: String,
    #[schema(example = json!(["AI improves diagnosis", "Reduces costs", "Enhances patient care"]))]
    pub key_points: Vec<String>,
    /// Word count of the summary as reported by the model.
    #[schema(example = 25)]
    #[serde(deserialize_with = "lenient::integer")]
    pub word_count: i64,
}

/// Result of `POST /api/ai/intent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    #[schema(example = "find_restaurant")]
    pub primary_intent: String,
    #[schema(example = json!(["location_search", "recommendation_request"]))]
    pub secondary_intents: Vec<String>,
    /// e.g. `question`, `request`, `statement`, `command`.
    #[schema(example = "question")]
    pub intent_category: String,
    #[schema(example = 0.88)]
    #[serde(deserialize_with = "lenient::float")]
    pub confidence: f64,
}

/// Number coercions for model-produced fields.
///
/// Models are sloppy about numeric types: `"0.9"` for a score, `25.0` for a
/// count. Both are accepted; a fractional count or a non-numeric string is
/// not.
mod lenient {
    use std::fmt;

    use serde::de::{self, Deserializer, Unexpected, Visitor};

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(IntegerVisitor)
    }

    struct FloatVisitor;

    impl Visitor<'_> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    struct IntegerVisitor;

    impl Visitor<'_> for IntegerVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, a whole float or an integer string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // 2^63 is exactly representable; anything at or past it overflows.
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse::<i64>()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_serializes_camel_case() {
        let value = serde_json::to_value(ClassificationResponse {
            labels: vec!["news".into()],
            primary_category: "news".into(),
            confidence: 0.8,
        })
        .unwrap();
        assert_eq!(value["primaryCategory"], "news");
        assert!(value.get("primary_category").is_none());
    }

    #[test]
    fn summary_rejects_fractional_word_count() {
        let json = r#"{"summary": "s", "keyPoints": [], "wordCount": 25.5}"#;
        assert!(serde_json::from_str::<SummaryResponse>(json).is_err());
    }

    #[test]
    fn summary_accepts_whole_float_word_count() {
        let json = r#"{"summary": "s", "keyPoints": [], "wordCount": 25.0}"#;
        let parsed: SummaryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.word_count, 25);
    }

    #[test]
    fn summary_rejects_non_numeric_word_count() {
        let json = r#"{"summary": "s", "keyPoints": [], "wordCount": "many"}"#;
        assert!(serde_json::from_str::<SummaryResponse>(json).is_err());
    }

    #[test]
    fn sentiment_accepts_numeric_strings() {
        let json = r#"{"overallSentiment": "negative", "sentimentScore": "-0.4", "emotions": [], "confidence": " 0.7 "}"#;
        let parsed: SentimentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sentiment_score, -0.4);
        assert_eq!(parsed.confidence, 0.7);
    }

    #[test]
    fn confidence_rejects_non_numeric_and_non_finite_strings() {
        for bad in [r#""high""#, r#""NaN""#, r#""inf""#, "true", "null"] {
            let json = format!(
                r#"{{"labels": [], "primaryCategory": "c", "confidence": {bad}}}"#
            );
            assert!(
                serde_json::from_str::<ClassificationResponse>(&json).is_err(),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn float_fields_accept_integer_literals() {
        let json = r#"{"primaryIntent": "greet", "secondaryIntents": [], "intentCategory": "statement", "confidence": 1}"#;
        let parsed: IntentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.confidence, 1.0);
    }
}
