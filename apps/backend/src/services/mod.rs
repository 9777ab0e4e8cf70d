//! Pipeline wiring from configuration.

pub mod providers;

use std::sync::Arc;

use mixlingo_core::translation::{LruCache, MemoryCache};
use mixlingo_core::{
    MixedContentComposer, OrchestratorConfig, ReviewScheduler, TranslationCache,
    TranslationOrchestrator, TranslationProvider, VocabularyClassifier,
};
use mixlingo_core::{MemoryStore, ProfileStore};
use reqwest::Client;

use crate::config::Config;
use crate::error::ApiError;
use crate::AppState;
use providers::{LibreTranslate, Lingva, MyMemory};

/// HTTP providers in priority order, skipping those without a base URL.
pub fn http_providers(config: &Config, client: &Client) -> Vec<Arc<dyn TranslationProvider>> {
    let mut chain: Vec<Arc<dyn TranslationProvider>> = Vec::new();

    if let Some(url) = &config.libretranslate_url {
        chain.push(Arc::new(LibreTranslate::new(
            client.clone(),
            url,
            config.libretranslate_api_key.clone(),
        )));
    }
    if let Some(url) = &config.lingva_url {
        chain.push(Arc::new(Lingva::new(client.clone(), url)));
    }
    if let Some(url) = &config.mymemory_url {
        chain.push(Arc::new(MyMemory::new(
            client.clone(),
            url,
            config.mymemory_email.clone(),
        )));
    }
    chain
}

pub fn translation_cache(config: &Config) -> Arc<dyn TranslationCache> {
    match config.cache_capacity {
        Some(capacity) => Arc::new(LruCache::new(capacity)),
        None => Arc::new(MemoryCache::new()),
    }
}

/// Assemble application state around `providers` and `store`.
pub fn build_state(
    config: &Config,
    providers: Vec<Arc<dyn TranslationProvider>>,
    store: Arc<dyn ProfileStore>,
) -> Result<AppState, ApiError> {
    let classifier = VocabularyClassifier::with_lexicon_tagger()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let classifier = Arc::new(classifier);

    let orchestrator = Arc::new(TranslationOrchestrator::new(
        providers,
        translation_cache(config),
        OrchestratorConfig {
            provider_timeout: config.provider_timeout,
        },
    ));

    let composer = Arc::new(MixedContentComposer::new(
        classifier.clone(),
        orchestrator.clone(),
        config.source_lang,
    ));

    Ok(AppState {
        classifier,
        orchestrator,
        composer,
        scheduler: Arc::new(ReviewScheduler::new(store)),
        source_lang: config.source_lang,
    })
}

/// State with HTTP providers and an in-memory profile store.
pub fn state_from_config(config: &Config) -> Result<AppState, ApiError> {
    let providers = http_providers(config, &Client::new());
    if providers.is_empty() {
        tracing::warn!("No translation providers configured, every translation will fail");
    }
    build_state(config, providers, Arc::new(MemoryStore::new()))
}
