//! Part-of-speech tagging behind a trait.
//!
//! Default backend: `NlpruleTagger`, which loads an nlprule tokenizer binary
//! (Penn Treebank tag set) from disk once at startup. `AppState` carries an
//! `Arc<dyn PosTagger>` so handlers and workflows never touch the model directly.

use std::path::Path;

use nlprule::Tokenizer;
use thiserror::Error;
use tracing::info;

/// Raised when the tagger model cannot be loaded. Fatal at startup.
#[derive(Debug, Error)]
#[error("Tagger model unavailable at '{path}': {reason}")]
pub struct TaggingUnavailable {
    pub path: String,
    pub reason: String,
}

/// Coarse part-of-speech classes. Only nouns matter for keyword extraction.
///
/// Ordered so that `max()` over a token's candidate tags prefers noun readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartOfSpeech {
    Other,
    CommonNoun,
    ProperNoun,
}

impl PartOfSpeech {
    /// Maps a Penn Treebank tag (`NN`, `NNS`, `NNP`, `NNPS`, ...) to a coarse class.
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "NN" | "NNS" => PartOfSpeech::CommonNoun,
            "NNP" | "NNPS" => PartOfSpeech::ProperNoun,
            _ => PartOfSpeech::Other,
        }
    }

    pub fn is_noun(self) -> bool {
        matches!(self, PartOfSpeech::CommonNoun | PartOfSpeech::ProperNoun)
    }
}

/// Readings nlprule attaches to every token that carry no part of speech.
const STRUCTURAL_TAGS: [&str; 3] = ["", "SENT_START", "SENT_END"];
/// nlprule's reading for a word missing from its dictionary.
const UNKNOWN_TAG: &str = "UNKNOWN";

/// Resolves a token's candidate tags to one class. Any noun reading wins.
/// A word the dictionary does not know (only `UNKNOWN` readings) is taken as a
/// proper noun when it contains a letter: `Kubernetes`, `GraphQL`, `PostgreSQL`.
pub fn resolve_pos<'a>(surface: &str, tags: impl IntoIterator<Item = &'a str>) -> PartOfSpeech {
    let mut best = PartOfSpeech::Other;
    let mut known = false;
    let mut unknown = false;

    for tag in tags {
        if STRUCTURAL_TAGS.contains(&tag) {
            continue;
        }
        if tag == UNKNOWN_TAG {
            unknown = true;
            continue;
        }
        known = true;
        best = best.max(PartOfSpeech::from_penn(tag));
    }

    if unknown && !known && surface.chars().any(char::is_alphabetic) {
        return PartOfSpeech::ProperNoun;
    }
    best
}

/// A token's surface form and its resolved part of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
}

/// The tagger trait. Implementations must be deterministic for a given model and input.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// nlprule-backed tagger.
pub struct NlpruleTagger {
    tokenizer: Tokenizer,
}

impl NlpruleTagger {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaggingUnavailable> {
        let path = path.as_ref();
        let unavailable = |reason: String| TaggingUnavailable {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(unavailable("file not found".to_string()));
        }

        let tokenizer = Tokenizer::new(path).map_err(|e| unavailable(e.to_string()))?;
        info!("Loaded tagger model from {}", path.display());

        Ok(Self { tokenizer })
    }
}

impl PosTagger for NlpruleTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();

        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let word = token.word();
                let surface = word.text().as_str();
                if surface.trim().is_empty() {
                    continue;
                }

                let pos = resolve_pos(
                    surface,
                    word.tags().iter().map(|data| data.pos().as_str()),
                );

                tagged.push(TaggedToken {
                    text: surface.to_string(),
                    pos,
                });
            }
        }

        tagged
    }

    fn backend(&self) -> &'static str {
        "nlprule"
    }
}
