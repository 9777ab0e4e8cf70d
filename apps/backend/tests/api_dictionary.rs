//! Dictionary API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

/// Test saving a word returns the created entry.
#[tokio::test]
async fn test_create_entry() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let learner = fixtures::unique_learner("create");

    let response = server
        .post(&format!("/api/learners/{learner}/dictionary"))
        .json(&fixtures::new_entry_request("gato", "cat"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["target_word"], "gato");
    assert_eq!(body["english_meaning"], "cat");
    assert_eq!(body["source"], "feed");
    let level = body["difficulty_level"].as_u64().unwrap();
    assert!((1..=5).contains(&level));
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

/// Test an explicit difficulty level is clamped into range.
#[tokio::test]
async fn test_create_entry_clamps_level() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/learners/ana/dictionary")
        .json(&json!({
            "target_word": "murciélago",
            "english_meaning": "bat",
            "difficulty_level": 9,
            "source": "manual"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["difficulty_level"], 5);
    assert_eq!(body["source"], "manual");
}

/// Test empty words are rejected.
#[tokio::test]
async fn test_create_entry_requires_word() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/learners/ana/dictionary")
        .json(&fixtures::new_entry_request("  ", "nothing"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test dictionaries are listed per learner.
#[tokio::test]
async fn test_list_entries_per_learner() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let ana = fixtures::unique_learner("ana");
    let ben = fixtures::unique_learner("ben");

    TestContext::create_entry(&server, &ana, "gato").await;
    TestContext::create_entry(&server, &ana, "perro").await;

    let response = server.get(&format!("/api/learners/{ana}/dictionary")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    let words: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["target_word"].as_str().unwrap())
        .collect();
    assert_eq!(words.len(), 2);
    assert!(words.contains(&"gato"));
    assert!(words.contains(&"perro"));

    let response = server.get(&format!("/api/learners/{ben}/dictionary")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["entries"].as_array().unwrap().is_empty());
}

/// Test editing an entry.
#[tokio::test]
async fn test_update_entry() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = TestContext::create_entry(&server, "ana", "gato").await;

    let response = server
        .put(&format!("/api/learners/ana/dictionary/{id}"))
        .json(&json!({ "english_meaning": "cat (animal)", "difficulty_level": 0 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["target_word"], "gato");
    assert_eq!(body["english_meaning"], "cat (animal)");
    assert_eq!(body["difficulty_level"], 1);
}

/// Test editing a missing entry is not found.
#[tokio::test]
async fn test_update_missing_entry() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .put(&format!("/api/learners/ana/dictionary/{}", Uuid::new_v4()))
        .json(&json!({ "english_meaning": "ghost" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

/// Test deleting an entry removes it and its review state.
#[tokio::test]
async fn test_delete_entry_cascades() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = TestContext::create_entry(&server, "ana", "gato").await;

    server
        .post("/api/learners/ana/reviews")
        .json(&fixtures::review_request(&id, json!("good")))
        .await
        .assert_status_ok();

    let response = server
        .delete(&format!("/api/learners/ana/dictionary/{id}"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let item_id = Uuid::parse_str(&id).unwrap();
    assert!(ctx
        .state
        .store()
        .get_review_state("ana", item_id)
        .await
        .unwrap()
        .is_none());

    let stats: Value = server.get("/api/learners/ana/study/stats").await.json();
    assert_eq!(stats["total"], 0);

    let response = server
        .delete(&format!("/api/learners/ana/dictionary/{id}"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
