//! Markdown → PDF bytes.
//!
//! [`render_document`] is the core entry point: lay the markdown out on pages of a
//! given size, then serialize. [`render_tailored_pdf`] first probes that size from
//! an uploaded PDF. The uploaded document is never modified or re-emitted; only its
//! first page's dimensions carry over.
//!
//! The render functions are synchronous and CPU-bound; handlers call them via `spawn_blocking`.

pub mod handlers;
pub mod pdf;

use thiserror::Error;

use crate::layout::{default_layout_config, layout_markdown, FontFamily, PageSize};

/// Rendering failures. Malformed markdown is never an error.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source document could not be parsed or its page size could not be determined.
    #[error("input document error: {0}")]
    InputDocument(String),

    /// A typeface could not be resolved.
    #[error("font resource error: {0}")]
    FontResource(String),

    /// The output document could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Renders `markdown` onto pages of `size` using one typeface family.
///
/// Output is a pure function of the inputs: identical inputs give identical bytes.
pub fn render_document(
    size: PageSize,
    markdown: &str,
    family: FontFamily,
) -> Result<Vec<u8>, RenderError> {
    let doc = layout_markdown(size, markdown, family, &default_layout_config());
    tracing::debug!(
        pages = doc.pages().len(),
        runs = doc.run_count(),
        width = size.width,
        height = size.height,
        "laid out markdown"
    );
    pdf::write_pdf(&doc)
}

/// Renders `markdown` at the first-page dimensions of `original`.
pub fn render_tailored_pdf(
    original: &[u8],
    markdown: &str,
    family: FontFamily,
) -> Result<Vec<u8>, RenderError> {
    let size = pdf::original_page_size(original)?;
    render_document(size, markdown, family)
}
