//! multiroute-core: task routing, backend chat calls and reply normalization.
//!
//! The server crate builds one [`ModelRouter`] and one [`OllamaClient`] at
//! startup, wraps them in an [`AiService`] and shares it across requests.

mod backend;
mod error;
mod normalize;
mod prompt;
mod router;
mod service;
mod types;

pub use backend::{BackendConfig, ChatBackend, OllamaClient, CHAT_TIMEOUT};
pub use error::{AiError, ReplyError};
pub use normalize::{parse_reply, strip_code_fences};
pub use prompt::build_prompt;
pub use router::{ModelRouter, ModelRoutes, TaskType};
pub use service::AiService;
pub use types::{ClassificationResponse, IntentResponse, SentimentResponse, SummaryResponse};
