use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline stage named in remote-call failures.
pub const STAGE_PROCESSING: &str = "processing";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Raw text cannot be empty")]
    EmptyInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("DeepSeek API key not found. Pass `api_key` with the request or set DEEPSEEK_API_KEY in your .env file")]
    CredentialMissing,

    #[error("Failed to initialize completion client: {0}")]
    ClientInit(String),

    #[error("Failed to process raw text with DeepSeek (stage: {stage}): {source}")]
    RemoteCall {
        stage: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("DeepSeek returned an empty completion")]
    EmptyCompletion,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a completion failure at `stage`, keeping empty output distinct.
    pub fn remote(stage: &'static str, error: LlmError) -> Self {
        match error {
            LlmError::EmptyContent => AppError::EmptyCompletion,
            source => AppError::RemoteCall { stage, source },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::CredentialMissing => (StatusCode::UNAUTHORIZED, "CREDENTIAL_MISSING"),
            AppError::ClientInit(msg) => {
                tracing::error!("Client init error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "CLIENT_INIT_FAILED")
            }
            AppError::RemoteCall { stage, source } => {
                tracing::error!("Remote call failed at stage {stage}: {source}");
                (StatusCode::BAD_GATEWAY, "REMOTE_CALL_FAILED")
            }
            AppError::EmptyCompletion => {
                tracing::error!("Remote call returned empty completion");
                (StatusCode::BAD_GATEWAY, "EMPTY_COMPLETION")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
