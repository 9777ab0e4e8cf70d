//! Learner profile persistence: dictionary entries and their review state.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{DictionaryEntry, ReviewCardState};

/// Storage for each learner's dictionary and review states.
///
/// Review states are keyed by the id of the dictionary entry they belong to.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All entries of a learner, oldest first.
    async fn list_entries(&self, learner_id: &str) -> Result<Vec<DictionaryEntry>, StoreError>;

    async fn get_entry(
        &self,
        learner_id: &str,
        item_id: Uuid,
    ) -> Result<Option<DictionaryEntry>, StoreError>;

    /// Insert or replace an entry.
    async fn put_entry(&self, learner_id: &str, entry: DictionaryEntry) -> Result<(), StoreError>;

    /// Remove an entry together with its review state.
    async fn delete_entry(&self, learner_id: &str, item_id: Uuid) -> Result<(), StoreError>;

    async fn get_review_state(
        &self,
        learner_id: &str,
        item_id: Uuid,
    ) -> Result<Option<ReviewCardState>, StoreError>;

    async fn put_review_state(
        &self,
        learner_id: &str,
        state: ReviewCardState,
    ) -> Result<(), StoreError>;

    async fn list_review_states(&self, learner_id: &str)
        -> Result<Vec<ReviewCardState>, StoreError>;
}

#[derive(Debug, Default)]
struct Profile {
    entries: HashMap<Uuid, DictionaryEntry>,
    reviews: HashMap<Uuid, ReviewCardState>,
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn list_entries(&self, learner_id: &str) -> Result<Vec<DictionaryEntry>, StoreError> {
        let profiles = self.profiles.read().await;
        let mut entries: Vec<DictionaryEntry> = profiles
            .get(learner_id)
            .map(|p| p.entries.values().cloned().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.date_added.cmp(&b.date_added).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn get_entry(
        &self,
        learner_id: &str,
        item_id: Uuid,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(learner_id)
            .and_then(|p| p.entries.get(&item_id))
            .cloned())
    }

    async fn put_entry(&self, learner_id: &str, entry: DictionaryEntry) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(learner_id.to_string())
            .or_default()
            .entries
            .insert(entry.id, entry);
        Ok(())
    }

    async fn delete_entry(&self, learner_id: &str, item_id: Uuid) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(learner_id)
            .ok_or(StoreError::EntryNotFound(item_id))?;
        profile
            .entries
            .remove(&item_id)
            .ok_or(StoreError::EntryNotFound(item_id))?;
        profile.reviews.remove(&item_id);
        Ok(())
    }

    async fn get_review_state(
        &self,
        learner_id: &str,
        item_id: Uuid,
    ) -> Result<Option<ReviewCardState>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(learner_id)
            .and_then(|p| p.reviews.get(&item_id))
            .cloned())
    }

    async fn put_review_state(
        &self,
        learner_id: &str,
        state: ReviewCardState,
    ) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(learner_id)
            .ok_or(StoreError::EntryNotFound(state.item_id))?;
        if !profile.entries.contains_key(&state.item_id) {
            return Err(StoreError::EntryNotFound(state.item_id));
        }
        profile.reviews.insert(state.item_id, state);
        Ok(())
    }

    async fn list_review_states(
        &self,
        learner_id: &str,
    ) -> Result<Vec<ReviewCardState>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(learner_id)
            .map(|p| p.reviews.values().cloned().collect())
            .unwrap_or_default())
    }
}
