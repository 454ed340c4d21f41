use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body shared by every analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextRequest {
    /// Text to be analyzed. Any string is accepted, including an empty one.
    #[schema(example = "I love this product! The quality is outstanding.")]
    pub text: String,
}
