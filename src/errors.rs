// src/errors.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdsmithError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model answered with text instead of an image.
    #[error("Model Response: {0}")]
    ModelResponse(String),

    #[error("Generation blocked. Reason: {0}")]
    GenerationBlocked(String),

    #[error("No image data or text response found.")]
    NoOutput,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdsmithError {
    /// Model refusals and blocked generations are final; everything that
    /// came back without an interpretable answer may be tried again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdsmithError::NoOutput | AdsmithError::Transport(_) | AdsmithError::Upstream { .. }
        )
    }

    fn label(&self) -> &'static str {
        match self {
            AdsmithError::Validation(_) => "Validation error",
            AdsmithError::ModelResponse(_) => "Model response",
            AdsmithError::GenerationBlocked(_) => "Generation blocked",
            AdsmithError::NoOutput | AdsmithError::Transport(_) | AdsmithError::Upstream { .. } => {
                "AI service error"
            }
            AdsmithError::Serialization(_) => "Data processing error",
            AdsmithError::Config(_) => "Configuration error",
        }
    }
}

impl From<reqwest::Error> for AdsmithError {
    fn from(e: reqwest::Error) -> Self {
        AdsmithError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for AdsmithError {
    fn from(e: serde_json::Error) -> Self {
        AdsmithError::Serialization(e.to_string())
    }
}

impl ResponseError for AdsmithError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdsmithError::Validation(_) => StatusCode::BAD_REQUEST,
            AdsmithError::ModelResponse(_) | AdsmithError::GenerationBlocked(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AdsmithError::NoOutput | AdsmithError::Transport(_) | AdsmithError::Upstream { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AdsmithError::Serialization(_) | AdsmithError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.label(),
            "message": self.to_string()
        }))
    }
}
