use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::routes::form::FormFields;
use crate::state::AppState;

pub const MISSING_ANALYSIS_FIELDS: &str = "Missing resume or job description";

/// POST /api/v1/analyze
/// Multipart: `resume` (PDF file), `jobDescription` (text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        let mut form = FormFields::read(&mut multipart).await?;
        let (Some(resume), Some(job_description)) =
            (form.take_bytes("resume"), form.take_text("jobDescription"))
        else {
            return Err(AppError::Validation(MISSING_ANALYSIS_FIELDS.to_string()));
        };

        // CPU-bound parse, kept off the async executor.
        let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&resume))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in text extraction: {e}"))
            })??;
        tracing::info!(chars = resume_text.len(), "resume text extracted");

        let request = AnalysisRequest {
            resume_text,
            job_description,
        };
        let result = state.analyzer.analyze(&request).await?;
        Ok(Json(result))
    }
    .instrument(span)
    .await
}
