//! Workflow reports: the structured result of one session action, plus its
//! plain-text rendering for the browser form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::ats::MatchResult;
use crate::analysis::keywords::KeywordSet;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub session_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    Enhance(EnhanceOutcome),
    Rate(RateOutcome),
    Optimize(OptimizeOutcome),
}

#[derive(Debug, Clone, Serialize)]
pub struct EnhanceOutcome {
    pub before: MatchResult,
    pub enhanced_resume: String,
    pub diff: String,
    pub after: MatchResult,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateOutcome {
    pub score: MatchResult,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeOutcome {
    pub resume_keywords: KeywordSet,
    pub jd_keywords: KeywordSet,
    pub missing_keywords: KeywordSet,
    pub advice: String,
    /// LLM placement suggestions; absent when no keywords are missing.
    pub suggestions: Option<String>,
}

impl WorkflowReport {
    /// Renders the report as plain text, one titled section per result.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        match &self.outcome {
            Outcome::Enhance(o) => {
                sections.push(score_section("ATS Score (Before Enhancement)", &o.before));
                sections.push(section("Enhanced Resume", &o.enhanced_resume));
                let diff = if o.diff.is_empty() {
                    "(no differences)"
                } else {
                    o.diff.as_str()
                };
                sections.push(section("Differences", diff));
                sections.push(score_section("ATS Score (After Enhancement)", &o.after));
                sections.push(section("AI Feedback", &o.feedback));
            }
            Outcome::Rate(o) => {
                sections.push(score_section("ATS Match Score", &o.score));
                sections.push(section("AI Feedback", &o.feedback));
            }
            Outcome::Optimize(o) => {
                sections.push(section(
                    "Keyword Optimization",
                    &format!(
                        "Resume Keywords: {}\nJD Keywords: {}\nMissing Keywords: {}\n\n{}",
                        join_keywords(&o.resume_keywords),
                        join_keywords(&o.jd_keywords),
                        join_keywords(&o.missing_keywords),
                        o.advice
                    ),
                ));
                if let Some(suggestions) = &o.suggestions {
                    sections.push(section("AI Suggestions", suggestions));
                }
            }
        }

        sections.push(format!("Session {} at {}", self.session_id, self.generated_at.to_rfc3339()));
        sections.join("\n\n")
    }
}

fn section(title: &str, body: &str) -> String {
    format!("{title}\n{}\n{body}", "=".repeat(title.chars().count()))
}

fn score_section(title: &str, result: &MatchResult) -> String {
    section(
        title,
        &format!(
            "Score: {:.2}%\nMatched Keywords: {}\nMissing Keywords: {}",
            result.score,
            join_keywords(&result.matched),
            join_keywords(&result.missing)
        ),
    )
}

fn join_keywords(keywords: &KeywordSet) -> String {
    if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
