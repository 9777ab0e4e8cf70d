//! Content endpoints: classification, translation and composition

use axum::{extract::State, Json};

use crate::error::{ApiError, ApiJson, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/content/classify
pub async fn classify(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        candidates: state.classifier.classify(&payload.text),
    })
}

/// POST /api/content/translate
pub async fn translate(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TranslateRequest>,
) -> Result<Json<Translation>> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let source = payload.source_lang.unwrap_or(state.source_lang);
    let translation = state
        .orchestrator
        .translate(&payload.text, source, payload.target_lang)
        .await;

    if !translation.ok {
        tracing::info!(text = %payload.text, target = %payload.target_lang, "translation exhausted");
    }
    Ok(Json(translation))
}

/// POST /api/content/compose
pub async fn compose(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ComposeRequest>,
) -> Result<Json<MixedContentResult>> {
    let result = state
        .composer
        .compose(&payload.text, payload.level, payload.target_lang)
        .await?;
    Ok(Json(result))
}

/// GET /api/content/cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let orchestrator = &state.orchestrator;
    Json(CacheStatsResponse {
        providers: orchestrator
            .provider_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        cache: orchestrator.cache_name().to_string(),
        stats: orchestrator.stats(),
    })
}
