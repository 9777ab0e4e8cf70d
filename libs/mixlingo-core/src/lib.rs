//! Core library for mixed-language reading.
//!
//! Provides:
//! - Vocabulary classification (part-of-speech tagging, difficulty levels)
//! - Translation orchestration over a provider chain with a shared cache
//! - Mixed content composition and the `{{WORD:n}}` marker protocol
//! - Spaced repetition scheduling (SM-2) over a learner's dictionary
//! - Shared types (Language, Rating, ReviewCardState, DictionaryEntry, etc.)

pub mod algorithm;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod scheduler;
pub mod store;
pub mod translation;
pub mod types;

pub use algorithm::SpacedRepetitionAlgorithm;
pub use classifier::{LexiconTagger, PartOfSpeechTagger, VocabularyClassifier};
pub use composer::{ComposedText, MixedContentComposer, WordSpan};
pub use error::{ComposeError, ProviderError, ScheduleError, StoreError, TagError};
pub use scheduler::{ReviewScheduler, ReviewStats, StudyItem, StudyQueue};
pub use store::{MemoryStore, ProfileStore};
pub use translation::{
    OrchestratorConfig, OrchestratorStats, Translation, TranslationCache, TranslationOrchestrator,
    TranslationProvider,
};
pub use types::{
    DictionaryEntry, DictionaryEntryUpdate, DirectionFlag, Language, MixedContentResult,
    NewDictionaryEntry, PartOfSpeech, Rating, ReviewCardState, VocabularyCandidate, WordMetadata,
};
