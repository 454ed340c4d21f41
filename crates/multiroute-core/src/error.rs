use thiserror::Error;

/// Why a model reply could not be turned into a typed result.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("reply is JSON but not an object")]
    NotAnObject,

    #[error("reply does not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Errors produced while routing a task to the model backend.
///
/// Every variant is a server-side failure; nothing here is retried.
#[derive(Debug, Error)]
pub enum AiError {
    /// The outbound HTTP client could not be constructed.
    #[error("failed to build backend HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("backend request for model `{model}` timed out")]
    Timeout { model: String },

    #[error("backend request for model `{model}` failed: {source}")]
    Transport {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("model `{model}` not found on backend")]
    ModelNotFound { model: String },

    #[error("backend returned HTTP {status} for model `{model}`: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },

    /// A 2xx answer whose body has no readable `message.content`.
    #[error("backend reply for model `{model}` has no message content: {source}")]
    Envelope {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    /// `raw` is the reply exactly as the backend sent it, before any cleanup.
    #[error("Failed to parse AI response as JSON: {raw}")]
    Parse {
        raw: String,
        #[source]
        source: ReplyError,
    },
}

impl AiError {
    /// `true` when the remote call itself did not complete successfully.
    pub fn is_backend_failure(&self) -> bool {
        !matches!(self, AiError::Parse { .. })
    }

    /// The untouched reply text for parse failures.
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            AiError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
