//! Translation cache storage.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Cache key: one entry per text and language pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub text: String,
    pub source: Language,
    pub target: Language,
}

impl CacheKey {
    pub fn new(text: &str, source: Language, target: Language) -> Self {
        Self {
            text: text.to_string(),
            source,
            target,
        }
    }
}

/// An accepted translation and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub translation: String,
    pub provider: String,
    pub resolved_at: DateTime<Utc>,
}

/// Storage for accepted translations.
///
/// Entries are immutable: `insert` never replaces an existing entry and
/// returns whichever entry ends up stored under the key.
pub trait TranslationCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    fn insert(&self, key: CacheKey, entry: CacheEntry) -> CacheEntry;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backend name, for logs.
    fn name(&self) -> &'static str;
}

/// Unbounded cache living as long as the process.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranslationCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn insert(&self, key: CacheKey, entry: CacheEntry) -> CacheEntry {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_insert(entry).clone()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Bounded cache evicting the least recently used entry.
pub struct LruCache {
    entries: Mutex<lru::LruCache<CacheKey, CacheEntry>>,
}

impl LruCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(lru::LruCache::new(capacity)),
        }
    }
}

impl TranslationCache for LruCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn insert(&self, key: CacheKey, entry: CacheEntry) -> CacheEntry {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&key) {
            return existing.clone();
        }
        entries.put(key, entry.clone());
        entry
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}
