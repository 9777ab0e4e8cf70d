//! Content API tests.
//!
//! These run against scripted in-process providers.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::fixtures;
use common::{ScriptedProvider, TestContext};

/// Test health endpoint.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

/// Test classification orders candidates by difficulty.
#[tokio::test]
async fn test_classify_fox_sentence() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/classify")
        .json(&fixtures::classify_request(fixtures::FOX_SENTENCE))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let words: Vec<&str> = body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["surface_form"].as_str().unwrap())
        .collect();
    assert_eq!(words, vec!["brown", "jumps", "quick", "fox"]);
}

/// Test classification of empty text yields no candidates.
#[tokio::test]
async fn test_classify_empty_text() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/classify")
        .json(&fixtures::classify_request(""))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["candidates"].as_array().unwrap().is_empty());
}

/// Test a translation is served from cache the second time.
#[tokio::test]
async fn test_translate_is_cached() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..2 {
        let response = server
            .post("/api/content/translate")
            .json(&fixtures::translate_request("cat", "es"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["translation"], "gato");
        assert_eq!(body["ok"], true);
    }
    assert_eq!(ctx.providers[0].calls(), 1);

    let response = server.get("/api/content/cache/stats").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["cache_hits"], 1);
    assert_eq!(stats["cached_entries"], 1);
    assert_eq!(stats["cache"], "memory");
    assert_eq!(stats["providers"], serde_json::json!(["scripted"]));
}

/// Test an untranslatable word reports ok = false.
#[tokio::test]
async fn test_translate_exhausted() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/translate")
        .json(&fixtures::translate_request("ephemeral", "es"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["translation"], "");
}

/// Test blank text is rejected.
#[tokio::test]
async fn test_translate_blank_text() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/translate")
        .json(&fixtures::translate_request("   ", "es"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test providers are tried in order and later ones are skipped once one succeeds.
#[tokio::test]
async fn test_translate_falls_back_in_order() {
    let first = ScriptedProvider::down("first");
    let second = ScriptedProvider::new("second", fixtures::SPANISH_WORDS);
    let third = ScriptedProvider::new("third", fixtures::SPANISH_WORDS);
    let ctx = TestContext::with_providers(vec![first.clone(), second.clone(), third.clone()]);
    let server = ctx.server();

    let response = server
        .post("/api/content/translate")
        .json(&fixtures::translate_request("fox", "es"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["translation"], "zorro");
    assert_eq!(body["provider"], "second");
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 1);
    assert_eq!(third.calls(), 0);
}

/// Test composing at the top level marks every candidate.
#[tokio::test]
async fn test_compose_level_five() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/compose")
        .json(&fixtures::compose_request(fixtures::FOX_SENTENCE, 5, "es"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["text"],
        "The {{WORD:0}} {{WORD:1}} {{WORD:2}} {{WORD:3}}."
    );

    let metadata = body["word_metadata"].as_array().unwrap();
    let pairs: Vec<(u64, &str, &str)> = metadata
        .iter()
        .map(|m| {
            (
                m["index"].as_u64().unwrap(),
                m["original"].as_str().unwrap(),
                m["translation"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            (0, "quick", "rápido"),
            (1, "brown", "marrón"),
            (2, "fox", "zorro"),
            (3, "jumps", "salta"),
        ]
    );
}

/// Test composing at the lowest level leaves short texts alone.
#[tokio::test]
async fn test_compose_level_one_no_translation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/compose")
        .json(&fixtures::compose_request(fixtures::FOX_SENTENCE, 1, "es"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["text"], fixtures::FOX_SENTENCE);
    assert!(body["word_metadata"].as_array().unwrap().is_empty());
    assert_eq!(ctx.providers[0].calls(), 0);
}

/// Test an out-of-range level is rejected.
#[tokio::test]
async fn test_compose_invalid_level() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for level in [0, 6] {
        let response = server
            .post("/api/content/compose")
            .json(&fixtures::compose_request(fixtures::FOX_SENTENCE, level, "es"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid_level");
    }
}

/// Test a total provider outage degrades to the original text.
#[tokio::test]
async fn test_compose_total_outage() {
    let ctx = TestContext::with_providers(vec![
        ScriptedProvider::down("a"),
        ScriptedProvider::down("b"),
    ]);
    let server = ctx.server();

    let response = server
        .post("/api/content/compose")
        .json(&fixtures::compose_request(fixtures::FOX_SENTENCE, 5, "es"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["text"], fixtures::FOX_SENTENCE);
    assert!(body["word_metadata"].as_array().unwrap().is_empty());

    let stats: Value = server.get("/api/content/cache/stats").await.json();
    assert_eq!(stats["cached_entries"], 0);
    assert_eq!(stats["exhausted"], 4);
}

/// Test unknown language codes are rejected with the API error format.
#[tokio::test]
async fn test_unknown_language_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/content/translate")
        .json(&fixtures::translate_request("cat", "xx"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert_eq!(ctx.providers[0].calls(), 0);
}
