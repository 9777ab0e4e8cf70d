//! Review scheduling over a learner's dictionary.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::error::ScheduleError;
use crate::store::ProfileStore;
use crate::types::{DictionaryEntry, Rating, ReviewCardState};

/// A dictionary entry paired with its current review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyItem {
    pub entry: DictionaryEntry,
    pub state: ReviewCardState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyQueue {
    pub new_items: Vec<StudyItem>,
    pub review_items: Vec<StudyItem>,
    pub new_remaining: usize,
    pub review_remaining: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub new: usize,
    pub due: usize,
    pub mature: usize,
}

type LockKey = (String, Uuid);
type LockMap = Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>;

/// Shared handle on one item's review lock. Removes the map entry on drop
/// when no other review holds or waits on it.
struct ItemLease<'a> {
    locks: &'a LockMap,
    key: LockKey,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for ItemLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One count for the map, one for this lease.
        if locks
            .get(&self.key)
            .is_some_and(|l| Arc::ptr_eq(l, &self.lock) && Arc::strong_count(l) == 2)
        {
            locks.remove(&self.key);
        }
    }
}

/// Applies ratings to review states and builds study queues.
///
/// Reviews of the same item are serialized; different items proceed in
/// parallel.
pub struct ReviewScheduler {
    store: Arc<dyn ProfileStore>,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    locks: LockMap,
}

impl ReviewScheduler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self::with_algorithm(store, Box::new(Sm2::default()))
    }

    pub fn with_algorithm(
        store: Arc<dyn ProfileStore>,
        algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    ) -> Self {
        Self {
            store,
            algorithm,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    /// Record a rating for `item_id` and return the new state.
    pub async fn review(
        &self,
        learner_id: &str,
        item_id: Uuid,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<ReviewCardState, ScheduleError> {
        let lease = self.lease(learner_id, item_id);
        let _guard = lease.lock.lock().await;
        self.apply(learner_id, item_id, rating, now).await
    }

    async fn apply(
        &self,
        learner_id: &str,
        item_id: Uuid,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<ReviewCardState, ScheduleError> {
        let entry = self
            .store
            .get_entry(learner_id, item_id)
            .await?
            .ok_or(ScheduleError::UnknownItem(item_id))?;

        let current = match self.store.get_review_state(learner_id, item_id).await? {
            Some(state) => state,
            None => self.algorithm.initial_state(item_id, entry.date_added),
        };

        let next = self.algorithm.schedule(&current, rating, now);
        self.store.put_review_state(learner_id, next.clone()).await?;

        tracing::debug!(
            learner = learner_id,
            item = %item_id,
            rating = rating.as_str(),
            interval = next.interval,
            ease = next.ease_factor,
            "review recorded"
        );
        Ok(next)
    }

    fn lease(&self, learner_id: &str, item_id: Uuid) -> ItemLease<'_> {
        let key = (learner_id.to_string(), item_id);
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key.clone()).or_default().clone()
        };
        ItemLease {
            locks: &self.locks,
            key,
            lock,
        }
    }

    /// Every entry of the learner with its state, defaulting unseen entries.
    async fn items(&self, learner_id: &str) -> Result<Vec<StudyItem>, ScheduleError> {
        let entries = self.store.list_entries(learner_id).await?;
        let mut states: HashMap<Uuid, ReviewCardState> = self
            .store
            .list_review_states(learner_id)
            .await?
            .into_iter()
            .map(|s| (s.item_id, s))
            .collect();

        Ok(entries
            .into_iter()
            .map(|entry| {
                let state = states
                    .remove(&entry.id)
                    .unwrap_or_else(|| self.algorithm.initial_state(entry.id, entry.date_added));
                StudyItem { entry, state }
            })
            .collect())
    }

    /// New items (oldest saved first) and due reviews (most overdue first),
    /// each capped by its limit.
    pub async fn study_queue(
        &self,
        learner_id: &str,
        now: DateTime<Utc>,
        new_limit: usize,
        review_limit: usize,
    ) -> Result<StudyQueue, ScheduleError> {
        let (mut new_items, mut review_items): (Vec<_>, Vec<_>) = self
            .items(learner_id)
            .await?
            .into_iter()
            .filter(|item| item.state.is_due(now))
            .partition(|item| item.state.is_new());

        new_items.sort_by(|a, b| a.entry.date_added.cmp(&b.entry.date_added));
        review_items.sort_by(|a, b| a.state.next_review.cmp(&b.state.next_review));
        new_items.truncate(new_limit);
        review_items.truncate(review_limit);

        Ok(StudyQueue {
            new_remaining: new_limit.saturating_sub(new_items.len()),
            review_remaining: review_limit.saturating_sub(review_items.len()),
            new_items,
            review_items,
        })
    }

    pub async fn stats(
        &self,
        learner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewStats, ScheduleError> {
        let items = self.items(learner_id).await?;
        let mut stats = ReviewStats {
            total: items.len(),
            ..Default::default()
        };
        for StudyItem { state, .. } in &items {
            if state.is_new() {
                stats.new += 1;
            }
            if state.is_due(now) {
                stats.due += 1;
            }
            if state.is_mature() {
                stats.mature += 1;
            }
        }
        Ok(stats)
    }
}
