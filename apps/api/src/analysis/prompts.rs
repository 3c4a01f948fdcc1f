// LLM prompt constants for resume analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona prepended to the shared JSON-only system prompt.
const ANALYSIS_PERSONA: &str = "You are an expert Resume Sculptor and ATS Optimizer. \
    Your goal is to maximize the candidate's chances by tailoring their resume \
    to the specific job description.";

/// Analysis prompt template. Replace `{resume_text}` and `{job_description}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r####"Analyze the following resume against the job description.

RESUME CONTENT:
{resume_text}

JOB DESCRIPTION:
{job_description}

Instructions:
1. Compare skills and experience.
2. Provide a match score from 0 to 100.
3. List missing and matching skills.
4. Rewrite the resume content to align with the job description, using its keywords.

STRICT RULES FOR THE TAILORED RESUME:
- Preserve the exact structure and sections of the original resume. Use ONLY sections that exist in it.
- Do NOT add new sections. Do NOT add a "Summary" section if the original has none.
- Keep the exact section order of the original.
- Integrate missing skills into the EXISTING skills section, in the same format and style. Never create a separate "Missing Skills" section.
- Enhance existing bullet points with relevant keywords from the job description.
- Use this markdown only: "# " for the name, "## " for section titles, "### " for entries, "- " for bullets, ** for bold text, "Label: value" for skill lines.
- tailoredResume MUST contain the complete rewritten resume.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "explanation": "Strong Rust background; no Kubernetes experience.",
  "missingSkills": ["Kubernetes"],
  "presentSkills": ["Rust", "PostgreSQL"],
  "tailoredResume": "# Jane Doe\n## Experience\n- **Led** a team of 5 engineers"
}"####;

pub fn analysis_system_prompt() -> String {
    format!("{ANALYSIS_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Fills the template in a single left-to-right pass, so placeholder text inside
/// either input is inserted literally and never expanded.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_placeholders(
        ANALYSIS_PROMPT_TEMPLATE,
        &[("{resume_text}", resume_text), ("{job_description}", job_description)],
    )
}

fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_inputs() {
        let prompt = build_analysis_prompt("Jane Doe, Rust engineer", "Senior Go developer");
        assert!(prompt.contains("Jane Doe, Rust engineer"));
        assert!(prompt.contains("Senior Go developer"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_placeholder_text_in_inputs_stays_literal() {
        let resume = "Wrote a {job_description} parser";
        let job = "Reads {resume_text} files";
        let prompt = build_analysis_prompt(resume, job);
        assert!(prompt.contains("RESUME CONTENT:\nWrote a {job_description} parser\n"));
        assert!(prompt.contains("JOB DESCRIPTION:\nReads {resume_text} files\n"));
        assert_eq!(prompt.matches("Reads").count(), 1);
        assert_eq!(prompt.matches("Wrote a").count(), 1);
    }

    #[test]
    fn test_prompt_keeps_full_markdown_guide() {
        let prompt = build_analysis_prompt("resume", "job");
        assert!(prompt.contains(
            r####""# " for the name, "## " for section titles, "### " for entries"####
        ));
        assert!(prompt.contains("\"tailoredResume\": \"# Jane Doe"));
        assert!(prompt.trim_end().ends_with('}'));
    }

    #[test]
    fn test_system_prompt_requires_json() {
        let system = analysis_system_prompt();
        assert!(system.contains("Resume Sculptor"));
        assert!(system.contains("valid JSON only"));
    }
}
