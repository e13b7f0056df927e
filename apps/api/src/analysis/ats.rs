//! ATS scoring: keyword overlap between a resume and a job description.
//!
//! matched = resume ∩ jd, missing = jd − resume,
//! score = 100 × |matched| / |jd| (0 when the JD has no keywords).
//! The score is never rounded here; presentation decides precision.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{extract_keywords, KeywordSet};
use crate::nlp::PosTagger;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64, // 0.0 – 100.0
    pub matched: KeywordSet,
    pub missing: KeywordSet,
}

/// Extracts keywords from both texts and scores the overlap.
pub fn ats_score(tagger: &dyn PosTagger, resume_text: &str, jd_text: &str) -> MatchResult {
    let resume_keywords = extract_keywords(tagger, resume_text);
    let jd_keywords = extract_keywords(tagger, jd_text);
    score_keyword_sets(&resume_keywords, &jd_keywords)
}

/// Scores two already-extracted keyword sets.
pub fn score_keyword_sets(resume_keywords: &KeywordSet, jd_keywords: &KeywordSet) -> MatchResult {
    let matched: KeywordSet = resume_keywords.intersection(jd_keywords).cloned().collect();
    let missing: KeywordSet = jd_keywords.difference(resume_keywords).cloned().collect();

    let score = if jd_keywords.is_empty() {
        0.0
    } else {
        100.0 * matched.len() as f64 / jd_keywords.len() as f64
    };

    MatchResult {
        score,
        matched,
        missing,
    }
}
