use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::document::DocumentError;
use crate::extraction::error::ExtractionError;
use crate::extraction::repair::ExtractionParseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error(transparent)]
    ExtractionParse(#[from] ExtractionParseError),

    #[error("AI authentication error: {0}")]
    UpstreamAuth(String),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::Parse(e) => AppError::ExtractionParse(e),
            ExtractionError::UpstreamAuth(msg) => AppError::UpstreamAuth(msg),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::UnsupportedType(_) => AppError::UnsupportedMedia(e.to_string()),
            DocumentError::Missing
            | DocumentError::WordDocument
            | DocumentError::InvalidText
            | DocumentError::Empty => AppError::Validation(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(e.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::ExtractionParse(e) => {
                tracing::error!("AI response parse error: {}", e.details);
                let body = Json(json!({
                    "error": {
                        "code": "AI_PARSE_ERROR",
                        "message": "Failed to parse AI response",
                        "raw_response": e.raw_snippet,
                        "details": e.details
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::UpstreamAuth(msg) => {
                tracing::error!("AI auth error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_AUTH_ERROR",
                    "AI service authentication failed. Please check the API key configuration."
                        .to_string(),
                )
            }
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
