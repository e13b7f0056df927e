// Deterministic analysis: keyword extraction, ATS scoring, diffing, prompt templates.
// Everything here is pure; the only collaborator is the injected PosTagger.

pub mod ats;
pub mod diff;
pub mod keywords;
pub mod prompts;
