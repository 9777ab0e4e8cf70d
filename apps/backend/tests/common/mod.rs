//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the full router to scripted in-process providers
//! - Helper functions for creating test data
//!
//! No network or database is needed.

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use mixlingo_backend::config::Config;
use mixlingo_backend::services::build_state;
use mixlingo_backend::{build_router, AppState};
use mixlingo_core::{Language, MemoryStore, ProviderError, TranslationProvider};

/// Provider answering from a fixed lowercase word table.
pub struct ScriptedProvider {
    name: String,
    table: HashMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(name: &str, pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            table: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    /// A provider that fails every request.
    pub fn down(name: &str) -> Arc<Self> {
        Self::new(name, &[])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(&text.to_lowercase())
            .cloned()
            .ok_or(ProviderError::Status(503))
    }
}

/// Test context holding the router and its providers.
pub struct TestContext {
    pub state: AppState,
    pub providers: Vec<Arc<ScriptedProvider>>,
    app: Router,
}

impl TestContext {
    /// Context with one provider knowing the Spanish fixture vocabulary.
    pub fn new() -> Self {
        Self::with_providers(vec![ScriptedProvider::new(
            "scripted",
            fixtures::SPANISH_WORDS,
        )])
    }

    pub fn with_providers(providers: Vec<Arc<ScriptedProvider>>) -> Self {
        let config = Config {
            provider_timeout: Duration::from_millis(200),
            ..Config::default()
        };
        let chain: Vec<Arc<dyn TranslationProvider>> = providers
            .iter()
            .map(|p| p.clone() as Arc<dyn TranslationProvider>)
            .collect();

        let state = build_state(&config, chain, Arc::new(MemoryStore::new()))
            .expect("Failed to build application state");
        let app = build_router(state.clone());

        Self {
            state,
            providers,
            app,
        }
    }

    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Save a dictionary entry through the API and return its id.
    pub async fn create_entry(server: &TestServer, learner: &str, word: &str) -> String {
        let response = server
            .post(&format!("/api/learners/{learner}/dictionary"))
            .json(&fixtures::new_entry_request(word, &format!("{word} meaning")))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_str().expect("entry id").to_string()
    }
}
