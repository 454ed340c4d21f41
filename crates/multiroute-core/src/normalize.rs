//! Turns a loosely formatted model reply into a typed result.
//!
//! Models often wrap JSON in Markdown fences. Cleanup runs in a fixed order:
//! the `json`-tagged opener, then a bare opener, then a trailing closer. The
//! closer is removed even when no opener was present.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AiError, ReplyError};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Remove surrounding whitespace and Markdown code fences from `raw`.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix(JSON_FENCE) {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_prefix(FENCE) {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix(FENCE) {
        cleaned = rest.trim_end();
    }
    cleaned.trim()
}

/// Decode `raw` into `T` after fence cleanup.
///
/// On any failure the returned [`AiError::Parse`] carries `raw` unmodified.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, AiError> {
    decode(strip_code_fences(raw)).map_err(|source| AiError::Parse {
        raw: raw.to_owned(),
        source,
    })
}

fn decode<T: DeserializeOwned>(cleaned: &str) -> Result<T, ReplyError> {
    let value: Value = serde_json::from_str(cleaned).map_err(ReplyError::Syntax)?;
    // Structs would otherwise also accept a positional array.
    if !value.is_object() {
        return Err(ReplyError::NotAnObject);
    }
    serde_json::from_value(value).map_err(ReplyError::Shape)
}
