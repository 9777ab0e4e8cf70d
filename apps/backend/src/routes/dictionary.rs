//! Dictionary endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use mixlingo_core::classifier::{dictionary_level, estimate_level};
use mixlingo_core::types::PartOfSpeech;
use uuid::Uuid;

use crate::error::{ApiError, ApiJson, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/learners/:learner_id/dictionary
pub async fn list(
    State(state): State<AppState>,
    Path(learner_id): Path<String>,
) -> Result<Json<DictionaryListResponse>> {
    let entries = state.store().list_entries(&learner_id).await?;
    Ok(Json(DictionaryListResponse { entries }))
}

/// POST /api/learners/:learner_id/dictionary
pub async fn create(
    State(state): State<AppState>,
    Path(learner_id): Path<String>,
    ApiJson(payload): ApiJson<NewDictionaryEntry>,
) -> Result<(StatusCode, Json<DictionaryEntry>)> {
    if payload.target_word.trim().is_empty() {
        return Err(ApiError::BadRequest("target_word must not be empty".to_string()));
    }
    if payload.english_meaning.trim().is_empty() {
        return Err(ApiError::BadRequest("english_meaning must not be empty".to_string()));
    }

    let level = payload.difficulty_level.unwrap_or_else(|| {
        dictionary_level(estimate_level(&payload.english_meaning, PartOfSpeech::Noun))
    });
    let entry = DictionaryEntry::create(payload, level, Utc::now());
    state.store().put_entry(&learner_id, entry.clone()).await?;

    tracing::info!(learner = %learner_id, item = %entry.id, word = %entry.target_word, "dictionary entry saved");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/learners/:learner_id/dictionary/:item_id
pub async fn update(
    State(state): State<AppState>,
    Path((learner_id, item_id)): Path<(String, Uuid)>,
    ApiJson(payload): ApiJson<DictionaryEntryUpdate>,
) -> Result<Json<DictionaryEntry>> {
    let mut entry = state
        .store()
        .get_entry(&learner_id, item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Dictionary entry {item_id}")))?;

    entry.apply(payload);
    state.store().put_entry(&learner_id, entry.clone()).await?;
    Ok(Json(entry))
}

/// DELETE /api/learners/:learner_id/dictionary/:item_id
pub async fn remove(
    State(state): State<AppState>,
    Path((learner_id, item_id)): Path<(String, Uuid)>,
) -> Result<StatusCode> {
    state.store().delete_entry(&learner_id, item_id).await?;
    tracing::info!(learner = %learner_id, item = %item_id, "dictionary entry removed");
    Ok(StatusCode::NO_CONTENT)
}
