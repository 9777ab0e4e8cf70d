//! Translation acquisition with provider fallback, caching and request
//! coalescing.

pub mod cache;
pub mod filter;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::error::ProviderError;
use crate::types::Language;

pub use cache::{CacheEntry, CacheKey, LruCache, MemoryCache, TranslationCache};

/// A third-party translation service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Provider identifier, recorded with cached entries.
    fn name(&self) -> &str;

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError>;
}

/// Outcome of a translation request.
///
/// `ok == false` means every provider failed; `translation` is then empty
/// and the caller decides how to degrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl Translation {
    fn exhausted() -> Self {
        Self {
            translation: String::new(),
            ok: false,
            provider: None,
        }
    }
}

/// Orchestrator tuning.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Upper bound for a single provider call.
    pub provider_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(5),
        }
    }
}

/// Snapshot of orchestrator counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub provider_calls: u64,
    pub provider_failures: u64,
    pub exhausted: u64,
    pub cached_entries: usize,
}

#[derive(Default)]
struct Counters {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    provider_calls: AtomicU64,
    provider_failures: AtomicU64,
    exhausted: AtomicU64,
}

type InFlight = Arc<OnceCell<Option<CacheEntry>>>;

/// Resolves translations through an ordered provider chain.
///
/// At most one provider chain runs per cache key at a time; concurrent
/// callers for the same key wait for that one resolution.
pub struct TranslationOrchestrator {
    providers: Vec<Arc<dyn TranslationProvider>>,
    cache: Arc<dyn TranslationCache>,
    config: OrchestratorConfig,
    in_flight: Mutex<HashMap<CacheKey, InFlight>>,
    counters: Counters,
}

impl TranslationOrchestrator {
    /// `providers` are tried in the order given.
    pub fn new(
        providers: Vec<Arc<dyn TranslationProvider>>,
        cache: Arc<dyn TranslationCache>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            providers,
            cache,
            config,
            in_flight: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn cache_name(&self) -> &'static str {
        self.cache.name()
    }

    /// Translate `text`; `ok` is false when every provider failed.
    pub async fn translate(&self, text: &str, source: Language, target: Language) -> Translation {
        match self.translate_entry(text, source, target).await {
            Some(entry) => Translation {
                translation: entry.translation,
                ok: true,
                provider: Some(entry.provider),
            },
            None => Translation::exhausted(),
        }
    }

    /// Like [`translate`](Self::translate) but returns the cache entry.
    pub async fn translate_entry(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<CacheEntry> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let key = CacheKey::new(text, source, target);
        if let Some(hit) = self.cache.get(&key) {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Translation cache hit: {:?} ({} -> {})", text, source, target);
            return Some(hit);
        }
        self.counters.cache_misses.fetch_add(1, Ordering::Relaxed);

        let cell = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let result = cell.get_or_init(|| self.resolve(&key)).await.clone();

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            in_flight.remove(&key);
        }

        result
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> OrchestratorStats {
        OrchestratorStats {
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.counters.cache_misses.load(Ordering::Relaxed),
            provider_calls: self.counters.provider_calls.load(Ordering::Relaxed),
            provider_failures: self.counters.provider_failures.load(Ordering::Relaxed),
            exhausted: self.counters.exhausted.load(Ordering::Relaxed),
            cached_entries: self.cache.len(),
        }
    }

    async fn resolve(&self, key: &CacheKey) -> Option<CacheEntry> {
        // A resolution that finished just before this one registered may
        // already have filled the cache.
        if let Some(hit) = self.cache.get(key) {
            return Some(hit);
        }

        let timeout = self.config.provider_timeout;
        for provider in &self.providers {
            self.counters.provider_calls.fetch_add(1, Ordering::Relaxed);

            let outcome = tokio::time::timeout(
                timeout,
                provider.translate(&key.text, key.source, key.target),
            )
            .await
            .unwrap_or(Err(ProviderError::Timeout(timeout)));

            match outcome {
                Ok(candidate) if filter::is_acceptable(&key.text, &candidate) => {
                    let entry = CacheEntry {
                        translation: candidate.trim().to_string(),
                        provider: provider.name().to_string(),
                        resolved_at: Utc::now(),
                    };
                    tracing::debug!(
                        "Provider {} translated {:?} -> {:?}",
                        provider.name(),
                        key.text,
                        entry.translation
                    );
                    return Some(self.cache.insert(key.clone(), entry));
                }
                Ok(candidate) => {
                    self.counters.provider_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        "Provider {} answer {:?} rejected for {:?}",
                        provider.name(),
                        candidate,
                        key.text
                    );
                }
                Err(e) => {
                    self.counters.provider_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        "Provider {} failed for {:?} ({} -> {}): {}",
                        provider.name(),
                        key.text,
                        key.source,
                        key.target,
                        e
                    );
                }
            }
        }

        self.counters.exhausted.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            "All {} translation providers failed for {:?} ({} -> {})",
            self.providers.len(),
            key.text,
            key.source,
            key.target
        );
        None
    }
}
