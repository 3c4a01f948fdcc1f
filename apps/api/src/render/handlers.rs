use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::render_tailored_pdf;
use crate::routes::form::FormFields;
use crate::state::AppState;

pub const MISSING_RENDER_FIELDS: &str = "Missing original PDF or tailored resume content";

const ATTACHMENT: &str = "attachment; filename=\"tailored-resume.pdf\"";

/// POST /api/v1/generate-pdf
/// Multipart: `originalPdf` (file), `tailoredResume` (markdown text).
/// Responds with a fresh PDF at the original's first-page size.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_pdf", %request_id);

    async move {
        let mut form = FormFields::read(&mut multipart).await?;
        let (Some(original), Some(markdown)) =
            (form.take_bytes("originalPdf"), form.take_text("tailoredResume"))
        else {
            return Err(AppError::Validation(MISSING_RENDER_FIELDS.to_string()));
        };

        let family = state.typeface;
        let pdf = tokio::task::spawn_blocking(move || {
            render_tailored_pdf(&original, &markdown, family)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}")))??;
        tracing::info!(bytes = pdf.len(), "tailored PDF generated");

        Ok((
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (header::CONTENT_DISPOSITION, ATTACHMENT),
            ],
            pdf,
        )
            .into_response())
    }
    .instrument(span)
    .await
}
