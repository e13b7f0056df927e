use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::nlp::PosTagger;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; everything in it is immutable.
#[derive(Clone)]
pub struct AppState {
    /// Part-of-speech tagger loaded at startup. Default: NlpruleTagger.
    pub tagger: Arc<dyn PosTagger>,
    /// Generation gateway. Default: GeminiClient.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
