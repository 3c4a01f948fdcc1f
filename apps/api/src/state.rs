use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::layout::FontFamily;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: LlmResumeAnalyzer. Tests swap in a stub.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Typeface family for every generated PDF, resolved once at startup.
    pub typeface: FontFamily,
}
