//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

pub const FOX_SENTENCE: &str = "The quick brown fox jumps.";

/// English to Spanish vocabulary known to the scripted provider.
pub const SPANISH_WORDS: &[(&str, &str)] = &[
    ("quick", "rápido"),
    ("brown", "marrón"),
    ("fox", "zorro"),
    ("jumps", "salta"),
    ("cat", "gato"),
];

pub fn classify_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

pub fn translate_request(text: &str, target: &str) -> serde_json::Value {
    json!({ "text": text, "target_lang": target })
}

pub fn compose_request(text: &str, level: u8, target: &str) -> serde_json::Value {
    json!({ "text": text, "level": level, "target_lang": target })
}

/// Create a save-word request body.
pub fn new_entry_request(word: &str, meaning: &str) -> serde_json::Value {
    json!({
        "target_word": word,
        "english_meaning": meaning,
        "example_sentence": format!("Un {word} aquí."),
        "example_translation": format!("A {meaning} here."),
    })
}

pub fn review_request(item_id: &str, rating: serde_json::Value) -> serde_json::Value {
    json!({ "item_id": item_id, "rating": rating })
}

/// Generate a unique learner id to keep tests independent.
pub fn unique_learner(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
