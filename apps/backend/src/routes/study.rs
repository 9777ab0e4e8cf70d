//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiJson, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/learners/:learner_id/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Path(learner_id): Path<String>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueue>> {
    let queue = state
        .scheduler
        .study_queue(
            &learner_id,
            Utc::now(),
            query.new_limit.unwrap_or(DEFAULT_NEW_LIMIT),
            query.review_limit.unwrap_or(DEFAULT_REVIEW_LIMIT),
        )
        .await?;
    Ok(Json(queue))
}

/// POST /api/learners/:learner_id/reviews
pub async fn review(
    State(state): State<AppState>,
    Path(learner_id): Path<String>,
    ApiJson(payload): ApiJson<ReviewRequest>,
) -> Result<Json<ReviewCardState>> {
    let rating = payload.rating.to_rating()?;
    let next = state
        .scheduler
        .review(&learner_id, payload.item_id, rating, Utc::now())
        .await?;
    Ok(Json(next))
}

/// GET /api/learners/:learner_id/study/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(learner_id): Path<String>,
) -> Result<Json<ReviewStats>> {
    let stats = state.scheduler.stats(&learner_id, Utc::now()).await?;
    Ok(Json(stats))
}
