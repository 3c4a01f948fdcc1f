use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Render(RenderError::InputDocument(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_DOCUMENT",
                msg.clone(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to generate PDF".to_string(),
                )
            }
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PDF_PARSE_FAILED",
                format!("Failed to parse PDF: {e}"),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let (status, body) = make_body(AppError::Validation("Missing field".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Missing field");
    }

    #[tokio::test]
    async fn test_input_document_is_unprocessable_with_cause() {
        let err = AppError::from(RenderError::InputDocument("PDF has no pages".into()));
        let (status, body) = make_body(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "PDF has no pages");
    }

    #[tokio::test]
    async fn test_serialization_failure_hides_details() {
        let err = AppError::from(RenderError::Serialization("io".into()));
        let (status, body) = make_body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "RENDER_ERROR");
    }

    #[tokio::test]
    async fn test_extraction_failure_code() {
        let (status, body) = make_body(AppError::from(ExtractionError::NoText)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "PDF_PARSE_FAILED");
    }

    #[tokio::test]
    async fn test_llm_error_is_internal() {
        let (status, body) = make_body(AppError::Llm("timeout".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }
}
