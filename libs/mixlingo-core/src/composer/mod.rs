//! Mixed-language composition.
//!
//! Replaces a learner-level-dependent share of a text's vocabulary with
//! target-language translations. Work happens on clean text plus a list of
//! spans; the `{{WORD:n}}` form is only produced by [`ComposedText::render`].

pub mod markers;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::classifier::VocabularyClassifier;
use crate::error::ComposeError;
use crate::translation::TranslationOrchestrator;
use crate::types::{DirectionFlag, Language, MixedContentResult, VocabularyCandidate, WordMetadata};

pub use markers::{marker, MARKER_PREFIX, MARKER_SUFFIX};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Share of letters in the target script above which text counts as
/// already immersive.
const IMMERSIVE_SCRIPT_SHARE: f64 = 0.3;

/// Translation requests one composition keeps open at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// One translated word inside the clean source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSpan {
    /// Byte offset into [`ComposedText::text`].
    pub offset: usize,
    /// Byte length of the original word.
    pub len: usize,
    pub original: String,
    pub translation: String,
    pub provider: String,
}

/// Clean text with translated spans, ordered by offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedText {
    pub text: String,
    pub spans: Vec<WordSpan>,
    pub direction: DirectionFlag,
    pub source: Language,
    pub target: Language,
}

impl ComposedText {
    fn plain(text: &str, source: Language, target: Language) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
            direction: DirectionFlag::for_base(source),
            source,
            target,
        }
    }

    /// Serialize into marker form. Indices follow text order.
    pub fn render(&self) -> MixedContentResult {
        let mut text = String::with_capacity(self.text.len());
        let mut word_metadata = Vec::with_capacity(self.spans.len());
        let mut cursor = 0;

        for (index, span) in self.spans.iter().enumerate() {
            text.push_str(&self.text[cursor..span.offset]);
            text.push_str(&marker(index));
            cursor = span.offset + span.len;

            word_metadata.push(WordMetadata {
                index,
                original: span.original.clone(),
                translation: span.translation.clone(),
                direction: self.direction,
                source_lang: self.source,
                target_lang: self.target,
                provider: span.provider.clone(),
            });
        }
        text.push_str(&self.text[cursor..]);

        MixedContentResult {
            text,
            word_metadata,
        }
    }
}

/// Candidates selected for translation at `level`.
///
/// The candidate at 1-based position `k` of `n` is selected when
/// `level >= ceil(k / n * 5)`.
pub fn select_for_level(candidates: &[VocabularyCandidate], level: u8) -> Vec<&VocabularyCandidate> {
    let n = candidates.len();
    let level = usize::from(level);
    let max = usize::from(MAX_LEVEL);
    candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let k = i + 1;
            let threshold = (k * max).div_ceil(n);
            level >= threshold
        })
        .map(|(_, c)| c)
        .collect()
}

/// Whether `text` is already mostly written in `target`'s script.
pub fn is_immersive(text: &str, target: Language) -> bool {
    let mut letters = 0usize;
    let mut owned = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        match target.owns_char(c) {
            None => return false,
            Some(true) => owned += 1,
            Some(false) => {}
        }
        letters += 1;
    }
    letters > 0 && owned as f64 / letters as f64 >= IMMERSIVE_SCRIPT_SHARE
}

/// Builds mixed-language text for a learner level.
pub struct MixedContentComposer {
    classifier: Arc<VocabularyClassifier>,
    orchestrator: Arc<TranslationOrchestrator>,
    base: Language,
    concurrency: usize,
}

impl MixedContentComposer {
    /// `base` is the language source texts are written in.
    pub fn new(
        classifier: Arc<VocabularyClassifier>,
        orchestrator: Arc<TranslationOrchestrator>,
        base: Language,
    ) -> Self {
        Self {
            classifier,
            orchestrator,
            base,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap on in-flight translation requests per composition. Zero is read as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn base_language(&self) -> Language {
        self.base
    }

    /// Compose `text` for `level` (1-5) in marker form.
    pub async fn compose(
        &self,
        text: &str,
        level: u8,
        target: Language,
    ) -> Result<MixedContentResult, ComposeError> {
        Ok(self.compose_spans(text, level, target).await?.render())
    }

    /// Compose `text` for `level` (1-5) as clean text plus spans.
    ///
    /// Words whose translation fails stay in place untranslated. Text that
    /// already contains `{{WORD:` is returned without spans, so its literal
    /// markers have no metadata behind them.
    pub async fn compose_spans(
        &self,
        text: &str,
        level: u8,
        target: Language,
    ) -> Result<ComposedText, ComposeError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(ComposeError::InvalidLevel(level));
        }

        if text.contains(MARKER_PREFIX) {
            tracing::warn!("Source text already contains marker syntax, leaving it untouched");
            return Ok(ComposedText::plain(text, self.base, target));
        }
        if is_immersive(text, target) {
            tracing::debug!("Text already in {} script, skipping composition", target);
            return Ok(ComposedText::plain(text, self.base, target));
        }

        let candidates = self.classifier.classify(text);
        let selected = select_for_level(&candidates, level);

        let lookups: Vec<_> = selected
            .iter()
            .map(|c| {
                self.orchestrator
                    .translate_entry(&c.surface_form, self.base, target)
            })
            .collect();
        let translations: Vec<_> = stream::iter(lookups)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut spans: Vec<WordSpan> = selected
            .into_iter()
            .zip(translations)
            .filter_map(|(candidate, entry)| match entry {
                Some(entry) => Some(WordSpan {
                    offset: candidate.offset,
                    len: candidate.surface_form.len(),
                    original: candidate.surface_form.clone(),
                    translation: entry.translation,
                    provider: entry.provider,
                }),
                None => {
                    tracing::debug!(
                        "No translation for {:?}, leaving it in {}",
                        candidate.surface_form,
                        self.base
                    );
                    None
                }
            })
            .collect();
        spans.sort_by_key(|s| s.offset);

        tracing::debug!(
            "Composed level {} text: {} of {} candidates translated",
            level,
            spans.len(),
            candidates.len()
        );

        let mut composed = ComposedText::plain(text, self.base, target);
        composed.spans = spans;
        Ok(composed)
    }
}
