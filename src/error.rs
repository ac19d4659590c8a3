// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Configuration problems detected while loading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OpenAI API key not found. Please set {var} in your environment.")]
    MissingCredential { var: &'static str },

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Failure of the completion collaborator.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("completion API error: {message}")]
    Api { message: String },
}

impl CompletionError {
    pub fn api(message: impl Into<String>) -> Self {
        CompletionError::Api {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::api(err.to_string())
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("session {0} not found")]
    NotFound(String),

    #[error("a reply is still pending for this session")]
    Busy,

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Busy => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
