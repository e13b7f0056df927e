//! Keyword extraction: reduces text to the set of lowercased nouns and proper nouns.

use std::collections::BTreeSet;

use crate::nlp::PosTagger;

/// Normalized noun / proper-noun tokens. Ordered only for stable output.
pub type KeywordSet = BTreeSet<String>;

/// Extracts the keyword set of `text`. Empty input yields an empty set.
pub fn extract_keywords(tagger: &dyn PosTagger, text: &str) -> KeywordSet {
    if text.trim().is_empty() {
        return KeywordSet::new();
    }

    tagger
        .tag(text)
        .into_iter()
        .filter(|token| token.pos.is_noun())
        .map(|token| token.text.to_lowercase())
        .collect()
}
