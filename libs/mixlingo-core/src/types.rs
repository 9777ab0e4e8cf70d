//! Core types shared by the pipeline and the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScheduleError;

/// Interval (days) from which a card counts as mature.
pub const MATURE_INTERVAL_DAYS: f64 = 21.0;

/// Supported languages, serialized as ISO-639-1 codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl Language {
    /// ISO-639-1 code used on the wire and by providers.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Chinese => "zh",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    /// Parse from an ISO-639-1 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "ja" => Some(Self::Japanese),
            "ko" => Some(Self::Korean),
            "zh" => Some(Self::Chinese),
            "es" => Some(Self::Spanish),
            "fr" => Some(Self::French),
            "de" => Some(Self::German),
            _ => None,
        }
    }

    /// Whether `c` belongs to this language's own script.
    ///
    /// Returns `None` for Latin-script languages, where the script alone
    /// cannot tell languages apart.
    pub fn owns_char(self, c: char) -> Option<bool> {
        let cp = c as u32;
        let cjk = (0x4E00..=0x9FFF).contains(&cp) || (0x3400..=0x4DBF).contains(&cp);
        match self {
            Self::Japanese => {
                let kana = (0x3040..=0x309F).contains(&cp) || (0x30A0..=0x30FF).contains(&cp);
                Some(kana || cjk)
            }
            Self::Korean => Some(
                (0xAC00..=0xD7AF).contains(&cp)
                    || (0x1100..=0x11FF).contains(&cp)
                    || (0x3130..=0x318F).contains(&cp),
            ),
            Self::Chinese => Some(cjk),
            Self::English | Self::Spanish | Self::French | Self::German => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Part-of-speech tag produced by a tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    ProperNoun,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Auxiliary,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Open-class tags that can carry teachable vocabulary.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::Verb | Self::Adjective | Self::Adverb | Self::ProperNoun
        )
    }
}

/// A word worth teaching, found in source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyCandidate {
    pub surface_form: String,
    pub part_of_speech: PartOfSpeech,
    pub source_context: String,
    /// Estimated difficulty, 1-10.
    pub difficulty: u8,
    /// Byte offset of the first occurrence in the classified text.
    pub offset: usize,
}

/// Which way a marked word toggles in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionFlag {
    /// English text, the marker shows the target-language word.
    ShowTargetFromEnglish,
    /// Target-language text, the marker shows the English word.
    ShowEnglishFromTarget,
}

impl DirectionFlag {
    pub fn for_base(base: Language) -> Self {
        match base {
            Language::English => Self::ShowTargetFromEnglish,
            _ => Self::ShowEnglishFromTarget,
        }
    }
}

/// Metadata for one `{{WORD:n}}` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMetadata {
    pub index: usize,
    pub original: String,
    pub translation: String,
    pub direction: DirectionFlag,
    pub source_lang: Language,
    pub target_lang: Language,
    pub provider: String,
}

/// Composed mixed-language text in marker form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixedContentResult {
    pub text: String,
    pub word_metadata: Vec<WordMetadata>,
}

impl MixedContentResult {
    /// Text returned as-is, without any markers.
    pub fn unmodified(text: &str) -> Self {
        Self {
            text: text.to_string(),
            word_metadata: Vec::new(),
        }
    }
}

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Result<Self, ScheduleError> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            _ => Err(ScheduleError::InvalidRating(value.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl FromStr for Rating {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => Err(ScheduleError::InvalidRating(other.to_string())),
        }
    }
}

/// Memory state of one learned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCardState {
    pub item_id: Uuid,
    /// Interval in days.
    pub interval: f64,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: DateTime<Utc>,
}

impl ReviewCardState {
    /// State of a never-reviewed item, due immediately.
    pub fn new(item_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            item_id,
            interval: 0.0,
            ease_factor: 2.5,
            repetitions: 0,
            last_reviewed: None,
            next_review: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    pub fn is_mature(&self) -> bool {
        self.interval >= MATURE_INTERVAL_DAYS
    }

    /// New cards are always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_new() || self.next_review <= now
    }
}

/// A learner's saved vocabulary item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: Uuid,
    pub target_word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    pub english_meaning: String,
    /// 1-5.
    pub difficulty_level: u8,
    pub example_sentence: String,
    pub example_translation: String,
    pub source: String,
    pub date_added: DateTime<Utc>,
}

/// Fields supplied when saving a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDictionaryEntry {
    pub target_word: String,
    #[serde(default)]
    pub reading: Option<String>,
    pub english_meaning: String,
    /// Derived from the word when absent.
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub example_translation: String,
    #[serde(default = "default_entry_source")]
    pub source: String,
}

fn default_entry_source() -> String {
    "feed".to_string()
}

impl Default for NewDictionaryEntry {
    fn default() -> Self {
        Self {
            target_word: String::new(),
            reading: None,
            english_meaning: String::new(),
            difficulty_level: None,
            example_sentence: String::new(),
            example_translation: String::new(),
            source: default_entry_source(),
        }
    }
}

/// Partial edit of a dictionary entry (all fields optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl DictionaryEntry {
    pub fn create(new: NewDictionaryEntry, difficulty_level: u8, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_word: new.target_word,
            reading: new.reading,
            english_meaning: new.english_meaning,
            difficulty_level: difficulty_level.clamp(1, 5),
            example_sentence: new.example_sentence,
            example_translation: new.example_translation,
            source: new.source,
            date_added: now,
        }
    }

    /// Apply an edit; `difficulty_level` is clamped to 1-5.
    pub fn apply(&mut self, update: DictionaryEntryUpdate) {
        if let Some(target_word) = update.target_word {
            self.target_word = target_word;
        }
        if let Some(reading) = update.reading {
            self.reading = Some(reading);
        }
        if let Some(english_meaning) = update.english_meaning {
            self.english_meaning = english_meaning;
        }
        if let Some(level) = update.difficulty_level {
            self.difficulty_level = level.clamp(1, 5);
        }
        if let Some(example_sentence) = update.example_sentence {
            self.example_sentence = example_sentence;
        }
        if let Some(example_translation) = update.example_translation {
            self.example_translation = example_translation;
        }
    }
}
