//! Uploaded resume PDF → plain text for the analyzer.
//!
//! `pdf-extract` does the heavy lifting. Some producers leave text runs
//! percent-encoded (`Jane%20Doe`), so every line is percent-decoded before the
//! text is handed off; anything that is not a valid `%XX` escape (`40%`) stays
//! as written.

use percent_encoding::percent_decode_str;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Parse(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),

    #[error("no extractable text in PDF")]
    NoText,
}

/// Extracts, decodes and normalizes the text of a resume PDF.
///
/// CPU-bound; call from `spawn_blocking`.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let raw = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|panic| ExtractionError::Panicked(panic_message(panic.as_ref())))?
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let text = normalize(&raw);
    if text.is_empty() {
        return Err(ExtractionError::NoText);
    }
    tracing::debug!(chars = text.len(), "extracted resume text");
    Ok(text)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Decodes percent escapes line by line, trims trailing whitespace, collapses
/// 3+ consecutive blank lines to one, and trims the whole text.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let decoded = percent_decode_str(line).decode_utf8_lossy();
        let line = decoded.trim_end();

        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        match blank_run {
            0 => {}
            1 | 2 => out.extend(std::iter::repeat('\n').take(blank_run)),
            _ => out.push('\n'),
        }
        blank_run = 0;

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }

    out.trim().to_string()
}
