//! Resume analyzer contract and its LLM-backed implementation.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; production wires in
//! [`LlmResumeAnalyzer`], tests a stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{analysis_system_prompt, build_analysis_prompt};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Validated analysis record, serialized to clients as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Match score, 0–100.
    pub score: u8,
    pub explanation: String,
    pub missing_skills: Vec<String>,
    pub present_skills: Vec<String>,
    /// Markdown in the resume dialect; may be empty.
    pub tailored_resume: String,
}

/// Model output before validation. The score arrives as any JSON number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    score: f64,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    present_skills: Vec<String>,
    #[serde(default)]
    tailored_resume: String,
}

impl TryFrom<RawAnalysis> for AnalysisResult {
    type Error = AppError;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        if !raw.score.is_finite() || !(0.0..=100.0).contains(&raw.score) {
            return Err(AppError::Llm(format!(
                "analysis score {} outside 0..=100",
                raw.score
            )));
        }
        if raw.tailored_resume.trim().is_empty() {
            tracing::warn!("tailoredResume is empty in analysis response");
        }
        Ok(AnalysisResult {
            score: raw.score.round() as u8,
            explanation: raw.explanation,
            missing_skills: raw.missing_skills,
            present_skills: raw.present_skills,
            tailored_resume: raw.tailored_resume,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer trait
// ────────────────────────────────────────────────────────────────────────────

/// Scores a resume against a job description and proposes a tailored rewrite.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError>;
}

/// Production analyzer backed by the hosted model.
pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let prompt = build_analysis_prompt(&request.resume_text, &request.job_description);
        let raw: RawAnalysis = self
            .0
            .call_json(&prompt, &analysis_system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

        let result = AnalysisResult::try_from(raw)?;
        tracing::info!(
            score = result.score,
            missing = result.missing_skills.len(),
            present = result.present_skills.len(),
            "resume analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_raw(json: &str) -> RawAnalysis {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_analysis_round_score() {
        let raw = make_raw(
            r##"{"score": 72.6, "explanation": "good", "missingSkills": ["Kubernetes"],
               "presentSkills": ["Rust"], "tailoredResume": "# Jane"}"##,
        );
        let result = AnalysisResult::try_from(raw).unwrap();
        assert_eq!(result.score, 73);
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
        assert_eq!(result.tailored_resume, "# Jane");
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result = AnalysisResult::try_from(make_raw(r#"{"score": 10}"#)).unwrap();
        assert!(result.missing_skills.is_empty());
        assert!(result.present_skills.is_empty());
        assert!(result.tailored_resume.is_empty());
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        for json in [r#"{"score": 101}"#, r#"{"score": -0.5}"#] {
            let err = AnalysisResult::try_from(make_raw(json)).unwrap_err();
            assert!(matches!(err, AppError::Llm(_)));
        }
    }

    #[test]
    fn test_score_boundaries_are_accepted() {
        assert_eq!(
            AnalysisResult::try_from(make_raw(r#"{"score": 0}"#)).unwrap().score,
            0
        );
        assert_eq!(
            AnalysisResult::try_from(make_raw(r#"{"score": 100}"#)).unwrap().score,
            100
        );
    }

    #[test]
    fn test_missing_score_fails_to_parse() {
        assert!(serde_json::from_str::<RawAnalysis>(r#"{"explanation": "x"}"#).is_err());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            score: 50,
            explanation: "ok".into(),
            missing_skills: vec![],
            present_skills: vec!["Go".into()],
            tailored_resume: String::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["presentSkills"][0], "Go");
        assert!(json.get("tailoredResume").is_some());
        assert!(json.get("tailored_resume").is_none());
    }
}
