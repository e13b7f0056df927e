// Part-of-speech tagging. The tagger is loaded once at startup and shared via AppState.

pub mod tagger;

pub use tagger::{NlpruleTagger, PosTagger};

#[cfg(test)]
pub use tagger::testing;
