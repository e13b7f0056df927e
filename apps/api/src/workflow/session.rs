//! Session workflows: one user action, run start to finish.
//!
//! Enhance: score → LLM rewrite → diff → re-score → LLM feedback on the rewrite.
//! Rate:    score → LLM feedback.
//! Optimize: keyword sets → missing keywords → LLM placement suggestions (only if any are missing).
//!
//! LLM calls are strictly sequential and any failure aborts the whole action,
//! except a missing credential in Optimize, which drops only the suggestions.
//! The rewritten resume is scored as-is; it is never re-validated.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::ats::{ats_score, score_keyword_sets};
use crate::analysis::diff::show_diff;
use crate::analysis::keywords::extract_keywords;
use crate::analysis::prompts::{enhance_prompt, optimize_prompt, rate_prompt};
use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};
use crate::nlp::PosTagger;
use crate::workflow::report::{
    EnhanceOutcome, OptimizeOutcome, Outcome, RateOutcome, WorkflowReport,
};

pub const ADVICE_MISSING_KEYWORDS: &str =
    "Add these keywords to your resume's Skills or Experience sections for better ATS compliance.";
pub const ADVICE_ALL_KEYWORDS_PRESENT: &str =
    "Your resume already contains all major keywords from the job description!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enhance,
    Rate,
    Optimize,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Enhance => "Enhance Resume",
            Action::Rate => "Rate Resume",
            Action::Optimize => "Optimize Resume",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = AppError;

    /// Accepts `enhance` as well as the UI label `Enhance Resume`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let key = normalized
            .strip_suffix(" resume")
            .unwrap_or(&normalized)
            .trim();

        match key {
            "enhance" => Ok(Action::Enhance),
            "rate" => Ok(Action::Rate),
            "optimize" => Ok(Action::Optimize),
            _ => Err(AppError::Validation(format!(
                "Unknown action '{}'. Expected one of: enhance, rate, optimize",
                s.trim()
            ))),
        }
    }
}

/// Runs one action against already-decoded resume and job-description text.
pub async fn run_action(
    tagger: &dyn PosTagger,
    llm: &dyn TextGenerator,
    action: Action,
    resume_text: &str,
    jd_text: &str,
) -> Result<WorkflowReport, AppError> {
    let session_id = Uuid::new_v4();
    info!("Session {session_id}: running '{action}' (tagger: {})", tagger.backend());

    let outcome = match action {
        Action::Enhance => Outcome::Enhance(enhance(tagger, llm, resume_text, jd_text).await?),
        Action::Rate => Outcome::Rate(rate(tagger, llm, resume_text, jd_text).await?),
        Action::Optimize => Outcome::Optimize(optimize(tagger, llm, resume_text, jd_text).await?),
    };

    info!("Session {session_id}: '{action}' complete");

    Ok(WorkflowReport {
        session_id,
        generated_at: Utc::now(),
        outcome,
    })
}

async fn enhance(
    tagger: &dyn PosTagger,
    llm: &dyn TextGenerator,
    resume_text: &str,
    jd_text: &str,
) -> Result<EnhanceOutcome, AppError> {
    let before = ats_score(tagger, resume_text, jd_text);
    info!("ATS score before enhancement: {:.2}%", before.score);

    let enhanced_resume = llm.generate(&enhance_prompt(resume_text, jd_text)).await?;
    let diff = show_diff(resume_text, &enhanced_resume);

    let after = ats_score(tagger, &enhanced_resume, jd_text);
    info!("ATS score after enhancement: {:.2}%", after.score);

    let feedback = llm.generate(&rate_prompt(&enhanced_resume, jd_text)).await?;

    Ok(EnhanceOutcome {
        before,
        enhanced_resume,
        diff,
        after,
        feedback,
    })
}

async fn rate(
    tagger: &dyn PosTagger,
    llm: &dyn TextGenerator,
    resume_text: &str,
    jd_text: &str,
) -> Result<RateOutcome, AppError> {
    let score = ats_score(tagger, resume_text, jd_text);
    info!("ATS score: {:.2}%", score.score);

    let feedback = llm.generate(&rate_prompt(resume_text, jd_text)).await?;

    Ok(RateOutcome { score, feedback })
}

async fn optimize(
    tagger: &dyn PosTagger,
    llm: &dyn TextGenerator,
    resume_text: &str,
    jd_text: &str,
) -> Result<OptimizeOutcome, AppError> {
    let resume_keywords = extract_keywords(tagger, resume_text);
    let jd_keywords = extract_keywords(tagger, jd_text);
    let missing_keywords = score_keyword_sets(&resume_keywords, &jd_keywords).missing;
    info!(
        "Keyword optimization: {} resume / {} JD / {} missing",
        resume_keywords.len(),
        jd_keywords.len(),
        missing_keywords.len()
    );

    let (advice, suggestions) = if missing_keywords.is_empty() {
        (ADVICE_ALL_KEYWORDS_PRESENT, None)
    } else {
        let suggestions = match llm.generate(&optimize_prompt(resume_text, jd_text)).await {
            Ok(suggestions) => Some(suggestions),
            Err(LlmError::MissingApiKey) => {
                warn!("No LLM credential; returning the keyword report without suggestions");
                None
            }
            Err(e) => return Err(e.into()),
        };
        (ADVICE_MISSING_KEYWORDS, suggestions)
    };

    Ok(OptimizeOutcome {
        resume_keywords,
        jd_keywords,
        missing_keywords,
        advice: advice.to_string(),
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::KeywordSet;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::nlp::testing::LexiconTagger;

    const RESUME: &str = "Engineer built systems.";
    const JD: &str = "Engineer needed for systems role.";

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_action_parsing_accepts_keys_and_labels() {
        assert_eq!("enhance".parse::<Action>().unwrap(), Action::Enhance);
        assert_eq!("Rate Resume".parse::<Action>().unwrap(), Action::Rate);
        assert_eq!("  OPTIMIZE  ".parse::<Action>().unwrap(), Action::Optimize);
        assert!(matches!(
            "translate".parse::<Action>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_action_labels_round_trip() {
        for action in [Action::Enhance, Action::Rate, Action::Optimize] {
            assert_eq!(action.label().parse::<Action>().unwrap(), action);
        }
    }

    #[tokio::test]
    async fn test_enhance_scores_before_and_after_the_rewrite() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::new([
            "Engineer built systems.\nOwned the systems role.",
            "Strong match: 95/100",
        ]);

        let report = run_action(&tagger, &llm, Action::Enhance, RESUME, JD)
            .await
            .unwrap();
        let Outcome::Enhance(outcome) = report.outcome else {
            panic!("expected enhance outcome");
        };

        assert_eq!(outcome.before.missing, set(&["role"]));
        assert!((outcome.before.score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(outcome.after.score, 100.0);
        assert!(outcome.diff.contains("+Owned the systems role."));
        assert_eq!(outcome.feedback, "Strong match: 95/100");

        // Feedback is requested on the rewritten resume, not the original.
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("professional resume writer"));
        assert!(prompts[1].contains("Owned the systems role."));
    }

    #[tokio::test]
    async fn test_rate_makes_a_single_call() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::new(["Score: 70/100"]);

        let report = run_action(&tagger, &llm, Action::Rate, RESUME, JD)
            .await
            .unwrap();
        let Outcome::Rate(outcome) = report.outcome else {
            panic!("expected rate outcome");
        };

        assert_eq!(outcome.score.matched, set(&["engineer", "systems"]));
        assert_eq!(outcome.feedback, "Score: 70/100");
        assert_eq!(llm.prompts().len(), 1);
        assert!(llm.prompts()[0].contains(RESUME));
    }

    #[tokio::test]
    async fn test_optimize_lists_missing_keywords_and_asks_for_placement() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::new(["role → Summary"]);

        let report = run_action(&tagger, &llm, Action::Optimize, RESUME, JD)
            .await
            .unwrap();
        let Outcome::Optimize(outcome) = report.outcome else {
            panic!("expected optimize outcome");
        };

        assert_eq!(outcome.resume_keywords, set(&["engineer", "systems"]));
        assert_eq!(outcome.jd_keywords, set(&["engineer", "systems", "role"]));
        assert_eq!(outcome.missing_keywords, set(&["role"]));
        assert_eq!(outcome.advice, ADVICE_MISSING_KEYWORDS);
        assert_eq!(outcome.suggestions.as_deref(), Some("role → Summary"));
    }

    #[tokio::test]
    async fn test_optimize_skips_llm_when_nothing_is_missing() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::default();

        let report = run_action(&tagger, &llm, Action::Optimize, JD, RESUME)
            .await
            .unwrap();
        let Outcome::Optimize(outcome) = report.outcome else {
            panic!("expected optimize outcome");
        };

        assert!(outcome.missing_keywords.is_empty());
        assert_eq!(outcome.advice, ADVICE_ALL_KEYWORDS_PRESENT);
        assert!(outcome.suggestions.is_none());
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_without_credential_still_reports_keywords() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::failing(LlmError::MissingApiKey);

        let report = run_action(&tagger, &llm, Action::Optimize, RESUME, JD)
            .await
            .unwrap();
        let Outcome::Optimize(outcome) = report.outcome else {
            panic!("expected optimize outcome");
        };

        assert_eq!(outcome.missing_keywords, set(&["role"]));
        assert_eq!(outcome.advice, ADVICE_MISSING_KEYWORDS);
        assert!(outcome.suggestions.is_none());
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_optimize_propagates_other_generation_failures() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::failing(LlmError::Blocked("SAFETY".to_string()));

        let err = run_action(&tagger, &llm, Action::Optimize, RESUME, JD)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(LlmError::Blocked(_))));
    }

    #[tokio::test]
    async fn test_generation_failure_aborts_the_action() {
        let tagger = LexiconTagger::english();
        let llm = ScriptedGenerator::failing(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        });

        let err = run_action(&tagger, &llm, Action::Enhance, RESUME, JD)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(LlmError::Api { status: 429, .. })));
        // No retry and no feedback call after the failed rewrite.
        assert_eq!(llm.prompts().len(), 1);
    }
}
