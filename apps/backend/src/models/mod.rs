//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use mixlingo_core::scheduler::{ReviewStats, StudyItem, StudyQueue};
pub use mixlingo_core::types::{
    DictionaryEntry, DictionaryEntryUpdate, Language, MixedContentResult, NewDictionaryEntry,
    Rating, ReviewCardState, VocabularyCandidate,
};
pub use mixlingo_core::{OrchestratorStats, ScheduleError, Translation};

pub const DEFAULT_NEW_LIMIT: usize = 20;
pub const DEFAULT_REVIEW_LIMIT: usize = 200;

// === Content ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub candidates: Vec<VocabularyCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    /// Defaults to the configured source language.
    #[serde(default)]
    pub source_lang: Option<Language>,
    pub target_lang: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
    pub text: String,
    pub level: u8,
    pub target_lang: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub providers: Vec<String>,
    pub cache: String,
    #[serde(flatten)]
    pub stats: OrchestratorStats,
}

// === Dictionary ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryListResponse {
    pub entries: Vec<DictionaryEntry>,
}

// === Study ===

/// A rating given either by name (`"good"`) or 4-point value (`3`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Value(u8),
    Name(String),
}

impl RatingInput {
    pub fn to_rating(&self) -> Result<Rating, ScheduleError> {
        match self {
            RatingInput::Value(value) => Rating::from_value(*value),
            RatingInput::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub item_id: Uuid,
    pub rating: RatingInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyQueueQuery {
    pub new_limit: Option<usize>,
    pub review_limit: Option<usize>,
}
