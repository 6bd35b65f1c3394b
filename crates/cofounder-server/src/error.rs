use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use cofounder_common::api::ErrorBody;
use cofounder_common::error::CommonError;
use cofounder_common::generator::GenerationError;

/// Startup failures. These stop the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request failures, rendered as `{error, details?}` with a matching status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Gemini API key not configured. Set GEMINI_API_KEY in the server environment.")]
    Configuration,

    #[error("Invalid Gemini API key.")]
    Auth(String),

    #[error("Failed to generate analysis. Please try again.")]
    Generation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn empty_idea() -> Self {
        ApiError::Validation("Please provide a startup idea.".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Configuration | ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::Generation(message) => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidCredential(message) => ApiError::Auth(message),
            GenerationError::Backend(message) => ApiError::Generation(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(ApiError::empty_idea().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Configuration.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Auth("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Generation("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_generation_failures_carry_details() {
        assert_eq!(
            ApiError::Generation("quota exhausted".into()).details().as_deref(),
            Some("quota exhausted")
        );
        assert_eq!(ApiError::Auth("API_KEY_INVALID".into()).details(), None);
    }
}
