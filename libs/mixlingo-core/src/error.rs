//! Error types for mixlingo-core.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a part-of-speech tagger.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("tokenizer failed: {0}")]
    Tokenize(String),

    #[error("tagger model unavailable: {0}")]
    Unavailable(String),
}

/// A single provider failed to produce a translation.
///
/// The orchestrator treats every variant the same way: move on to the next
/// provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("empty response")]
    Empty,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur while composing mixed content.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("learner level must be between 1 and 5, got {0}")]
    InvalidLevel(u8),
}

/// Errors from the profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dictionary entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors from review scheduling.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid rating: {0}")]
    InvalidRating(String),

    #[error("no dictionary entry {0} to review")]
    UnknownItem(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}
