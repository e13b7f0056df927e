// Session controller: decodes uploads, runs one of the three actions
// (Enhance / Rate / Optimize) and renders the result.
// All LLM calls go through the TextGenerator seam; nothing here talks to Gemini directly.

pub mod handlers;
pub mod report;
pub mod session;
