pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::render::handlers::handle_generate_pdf;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handle_analyze))
        // Render API
        .route("/api/v1/generate-pdf", post(handle_generate_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::handlers::MISSING_ANALYSIS_FIELDS;
    use crate::analysis::{AnalysisRequest, AnalysisResult, ResumeAnalyzer};
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::layout::{FontFamily, PageSize};
    use crate::render::handlers::MISSING_RENDER_FIELDS;
    use crate::render::{pdf::original_page_size, render_document};

    const BOUNDARY: &str = "sculptor-test-boundary";

    /// Echoes the job description back as the explanation.
    struct StubAnalyzer;

    #[async_trait]
    impl ResumeAnalyzer for StubAnalyzer {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
            Ok(AnalysisResult {
                score: 64,
                explanation: request.job_description.clone(),
                missing_skills: vec!["Kubernetes".to_string()],
                present_skills: vec!["Rust".to_string()],
                tailored_resume: "# Jane Doe".to_string(),
            })
        }
    }

    fn make_state(max_upload_mb: usize) -> AppState {
        AppState {
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_upload_mb,
                resume_typeface: "helvetica".to_string(),
            },
            analyzer: Arc::new(StubAnalyzer),
            typeface: FontFamily::Helvetica,
        }
    }

    struct Part<'a> {
        name: &'a str,
        filename: Option<&'a str>,
        data: &'a [u8],
    }

    fn file_part<'a>(name: &'a str, data: &'a [u8]) -> Part<'a> {
        Part {
            name,
            filename: Some("resume.pdf"),
            data,
        }
    }

    fn text_part<'a>(name: &'a str, text: &'a str) -> Part<'a> {
        Part {
            name,
            filename: None,
            data: text.as_bytes(),
        }
    }

    fn make_multipart(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match part.filename {
                Some(f) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n",
                    part.name
                ),
                None => format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                ),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_multipart(
        state: AppState,
        uri: &str,
        parts: &[Part<'_>],
    ) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(make_multipart(parts)))
            .unwrap();
        build_router(state).oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn make_resume_pdf(size: PageSize) -> Vec<u8> {
        render_document(
            size,
            "# Jane Doe\n## Skills\n- Languages: Rust, Go",
            FontFamily::Helvetica,
        )
        .unwrap()
    }

    // ── health ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = build_router(make_state(10)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "sculptor-api");
    }

    // ── analyze ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_analyze_missing_job_description() {
        let pdf = make_resume_pdf(PageSize::LETTER);
        let response = post_multipart(
            make_state(10),
            "/api/v1/analyze",
            &[file_part("resume", &pdf)],
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], MISSING_ANALYSIS_FIELDS);
    }

    #[tokio::test]
    async fn test_analyze_blank_job_description_counts_as_missing() {
        let pdf = make_resume_pdf(PageSize::LETTER);
        let response = post_multipart(
            make_state(10),
            "/api/v1/analyze",
            &[
                file_part("resume", &pdf),
                text_part("jobDescription", "   "),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_returns_camel_case_record() {
        let pdf = make_resume_pdf(PageSize::LETTER);
        let response = post_multipart(
            make_state(10),
            "/api/v1/analyze",
            &[
                file_part("resume", &pdf),
                text_part("jobDescription", "Senior Rust engineer"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["score"], 64);
        assert_eq!(json["explanation"], "Senior Rust engineer");
        assert_eq!(json["missingSkills"][0], "Kubernetes");
        assert_eq!(json["presentSkills"][0], "Rust");
        assert_eq!(json["tailoredResume"], "# Jane Doe");
    }

    #[tokio::test]
    async fn test_analyze_unparseable_resume() {
        let response = post_multipart(
            make_state(10),
            "/api/v1/analyze",
            &[
                file_part("resume", b"not a pdf"),
                text_part("jobDescription", "Senior Rust engineer"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PDF_PARSE_FAILED");
    }

    // ── generate-pdf ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_pdf_missing_markdown() {
        let pdf = make_resume_pdf(PageSize::LETTER);
        let response = post_multipart(
            make_state(10),
            "/api/v1/generate-pdf",
            &[file_part("originalPdf", &pdf)],
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], MISSING_RENDER_FIELDS);
    }

    #[tokio::test]
    async fn test_generate_pdf_keeps_original_page_size() {
        let a4 = PageSize::new(595.0, 842.0).unwrap();
        let original = make_resume_pdf(a4);
        let markdown = "# Jane Doe\n## Experience\n- **Led** a team of 5 engineers\n";

        let response = post_multipart(
            make_state(10),
            "/api/v1/generate-pdf",
            &[
                file_part("originalPdf", &original),
                text_part("tailoredResume", markdown),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tailored-resume.pdf\""
        );

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(original_page_size(&bytes).unwrap(), a4);
    }

    #[tokio::test]
    async fn test_generate_pdf_rejects_non_pdf_original() {
        let response = post_multipart(
            make_state(10),
            "/api/v1/generate-pdf",
            &[
                file_part("originalPdf", b"plain text"),
                text_part("tailoredResume", "# Jane"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_DOCUMENT");
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_rejected() {
        let oversized = vec![b'x'; 2 * 1024 * 1024];
        let response = post_multipart(
            make_state(1),
            "/api/v1/generate-pdf",
            &[
                file_part("originalPdf", &oversized),
                text_part("tailoredResume", "# Jane"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
