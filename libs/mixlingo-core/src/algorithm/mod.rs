//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Rating, ReviewCardState};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the state after a review at `now`.
    fn schedule(&self, state: &ReviewCardState, rating: Rating, now: DateTime<Utc>) -> ReviewCardState;

    /// Initial state for a never-reviewed item.
    fn initial_state(&self, item_id: Uuid, now: DateTime<Utc>) -> ReviewCardState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}
