//! Vocabulary classification: which words in a text are worth teaching.

pub mod difficulty;
pub mod tagger;

use std::collections::HashSet;

use crate::error::TagError;
use crate::types::VocabularyCandidate;

pub use difficulty::{dictionary_level, estimate_level};
pub use tagger::{LexiconTagger, PartOfSpeechTagger, TaggedToken};

const MIN_WORD_LEN: usize = 3;
const MAX_WORD_LEN: usize = 15;

/// Basic function words that are never taught, whatever the tagger says.
pub const STOPLIST: &[&str] = &[
    // articles
    "a", "an", "the",
    // prepositions
    "in", "on", "at", "by", "for", "with", "to", "from", "of", "about", "into", "over", "under",
    // conjunctions
    "and", "or", "but", "so", "yet", "nor", "if", "because", "than",
    // copulas and basic auxiliaries
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "not", "this", "that", "there",
];

/// Picks teachable vocabulary out of free text.
pub struct VocabularyClassifier {
    tagger: Box<dyn PartOfSpeechTagger>,
    stoplist: HashSet<&'static str>,
}

impl VocabularyClassifier {
    pub fn new(tagger: Box<dyn PartOfSpeechTagger>) -> Self {
        Self {
            tagger,
            stoplist: STOPLIST.iter().copied().collect(),
        }
    }

    /// Classifier backed by the built-in [`LexiconTagger`].
    pub fn with_lexicon_tagger() -> Result<Self, TagError> {
        Ok(Self::new(Box::new(LexiconTagger::new()?)))
    }

    /// Teachable words in `text`, deduplicated and ordered by priority:
    /// difficulty descending, then length descending, then alphabetically.
    ///
    /// Tagging failures yield an empty list.
    pub fn classify(&self, text: &str) -> Vec<VocabularyCandidate> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let tokens = match self.tagger.tag(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("Tagging failed, no vocabulary extracted: {}", e);
                return Vec::new();
            }
        };

        let sentences = sentence_bounds(text);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for token in tokens {
            if !self.qualifies(&token) {
                continue;
            }
            if !seen.insert(token.text.to_lowercase()) {
                continue;
            }

            let context = sentences
                .iter()
                .find(|(start, end)| token.offset >= *start && token.offset < *end)
                .map(|(start, end)| text[*start..*end].trim().to_string())
                .unwrap_or_default();

            candidates.push(VocabularyCandidate {
                difficulty: estimate_level(&token.text, token.pos),
                surface_form: token.text,
                part_of_speech: token.pos,
                source_context: context,
                offset: token.offset,
            });
        }

        candidates.sort_by(|a, b| {
            b.difficulty
                .cmp(&a.difficulty)
                .then_with(|| {
                    b.surface_form
                        .chars()
                        .count()
                        .cmp(&a.surface_form.chars().count())
                })
                .then_with(|| {
                    a.surface_form
                        .to_lowercase()
                        .cmp(&b.surface_form.to_lowercase())
                })
        });

        tracing::debug!("Classified {} vocabulary candidates", candidates.len());
        candidates
    }

    /// Whether a tagged token is teachable vocabulary.
    pub fn qualifies(&self, token: &TaggedToken) -> bool {
        if !token.pos.is_content() {
            return false;
        }
        if !token
            .text
            .chars()
            .all(|c| c.is_alphabetic() || c == '\'' || c == '’')
        {
            return false;
        }

        let lower = token.text.to_lowercase();
        let letters = lower.chars().filter(|c| c.is_alphabetic()).count();
        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&letters) {
            return false;
        }

        !self.stoplist.contains(lower.as_str())
    }
}

/// Byte ranges of sentences, split after `.`, `!`, `?` and newlines.
fn sentence_bounds(text: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            let end = idx + c.len_utf8();
            bounds.push((start, end));
            start = end;
        }
    }
    if start < text.len() {
        bounds.push((start, text.len()));
    }
    bounds
}
