use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

/// All fields of a multipart upload, buffered by name. Later duplicates win.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, Bytes>,
}

impl FormFields {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::error!("Failed to read multipart field: {e}");
            upload_error("Failed to read upload", e)
        })? {
            let name = field.name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read data for field '{name}': {e}");
                upload_error(&format!("Failed to read field '{name}'"), e)
            })?;
            tracing::debug!("Received field '{}' ({} bytes)", name, data.len());
            fields.insert(name, data);
        }

        Ok(Self { fields })
    }

    /// Raw bytes of a non-empty field.
    pub fn take_bytes(&mut self, name: &str) -> Option<Bytes> {
        self.fields.remove(name).filter(|b| !b.is_empty())
    }

    /// UTF-8 text of a field that is not blank.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.take_bytes(name)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Body-limit overruns keep their 413; everything else is a malformed request.
fn upload_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {e}"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
