use async_trait::async_trait;

use crate::gemini::{GeminiClient, GeminiClientError};

/// Why a generation call failed, as far as request handling cares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("{0}")]
    Backend(String),
}

impl From<GeminiClientError> for GenerationError {
    fn from(err: GeminiClientError) -> Self {
        if err.is_invalid_credential() {
            GenerationError::InvalidCredential(err.to_string())
        } else {
            GenerationError::Backend(err.to_string())
        }
    }
}

/// A backend that turns a fully assembled prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(self.generate_content(prompt).await?)
    }
}
