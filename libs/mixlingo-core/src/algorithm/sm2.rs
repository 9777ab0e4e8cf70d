//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with a four-button rating and configurable
//! parameters.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Rating, ReviewCardState};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub easy_bonus: f64,
    pub hard_multiplier: f64,
    pub graduating_interval: f64,
    pub second_interval: f64,
    pub easy_interval: f64,
    pub again_penalty: f64,
    pub hard_penalty: f64,
    pub easy_reward: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            easy_bonus: 1.3,
            hard_multiplier: 1.2,
            graduating_interval: 1.0,
            second_interval: 6.0,
            easy_interval: 4.0,
            again_penalty: 0.2,
            hard_penalty: 0.15,
            easy_reward: 0.15,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, item_id: Uuid, now: DateTime<Utc>) -> ReviewCardState {
        ReviewCardState {
            ease_factor: self.initial_ease,
            ..ReviewCardState::new(item_id, now)
        }
    }

    fn schedule(&self, state: &ReviewCardState, rating: Rating, now: DateTime<Utc>) -> ReviewCardState {
        let (repetitions, interval, ease_factor) = match rating {
            Rating::Again => (
                0,
                0.0,
                (state.ease_factor - self.again_penalty).max(self.minimum_ease),
            ),
            Rating::Hard => {
                let interval = if state.interval == 0.0 {
                    self.graduating_interval
                } else {
                    (state.interval * self.hard_multiplier).max(state.interval + 1.0)
                };
                (
                    state.repetitions + 1,
                    interval,
                    (state.ease_factor - self.hard_penalty).max(self.minimum_ease),
                )
            }
            Rating::Good => {
                let interval = match state.repetitions {
                    0 => self.graduating_interval,
                    1 => self.second_interval,
                    _ => (state.interval * state.ease_factor).round(),
                };
                (state.repetitions + 1, interval, state.ease_factor)
            }
            Rating::Easy => {
                let interval = if state.repetitions == 0 {
                    self.easy_interval
                } else {
                    (state.interval * state.ease_factor * self.easy_bonus).round()
                };
                (
                    state.repetitions + 1,
                    interval,
                    state.ease_factor + self.easy_reward,
                )
            }
        };

        ReviewCardState {
            item_id: state.item_id,
            interval,
            ease_factor,
            repetitions,
            last_reviewed: Some(now),
            next_review: now + Duration::days(interval.round() as i64),
        }
    }
}
