use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for multipart uploads, in megabytes.
    pub max_upload_mb: usize,
    /// Raw `RESUME_TYPEFACE` value; resolved to a font family at startup.
    pub resume_typeface: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
            resume_typeface: std::env::var("RESUME_TYPEFACE")
                .unwrap_or_else(|_| "helvetica".to_string()),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
