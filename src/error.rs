use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpungementError>;

#[derive(Debug, Error)]
pub enum ExpungementError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI request failed: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion endpoint returned no choices")]
    EmptyCompletion,

    #[error("Character {ch:?} at position {position} cannot be encoded in the document font")]
    UnsupportedCharacter { ch: char, position: usize },

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ExpungementError {
    fn into_response(self) -> Response {
        match self {
            ExpungementError::Validation(msg) => {
                tracing::warn!("Rejected submission: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response()
            }
            ExpungementError::NotFound(what) => {
                tracing::info!("Not found: {}", what);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            other => {
                tracing::error!("Submission failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1><p>Please try again later.</p>"),
                )
                    .into_response()
            }
        }
    }
}
