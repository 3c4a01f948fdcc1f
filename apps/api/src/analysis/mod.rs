// Resume ↔ job description analysis: match score, skill gaps, tailored markdown.
// All LLM calls go through llm_client. The analyzer is a trait seam so tests can stub it.

pub mod analyzer;
pub mod handlers;
pub mod prompts;

pub use analyzer::{AnalysisRequest, AnalysisResult, LlmResumeAnalyzer, ResumeAnalyzer};
