pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use mixlingo_core::{
    Language, MixedContentComposer, ProfileStore, ReviewScheduler, TranslationOrchestrator,
    VocabularyClassifier,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<VocabularyClassifier>,
    pub orchestrator: Arc<TranslationOrchestrator>,
    pub composer: Arc<MixedContentComposer>,
    pub scheduler: Arc<ReviewScheduler>,
    pub source_lang: Language,
}

impl AppState {
    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        self.scheduler.store()
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let learner_routes = Router::new()
        .route(
            "/api/learners/:learner_id/dictionary",
            get(routes::dictionary::list).post(routes::dictionary::create),
        )
        .route(
            "/api/learners/:learner_id/dictionary/:item_id",
            put(routes::dictionary::update).delete(routes::dictionary::remove),
        )
        .route("/api/learners/:learner_id/reviews", post(routes::study::review))
        .route("/api/learners/:learner_id/study/queue", get(routes::study::queue))
        .route("/api/learners/:learner_id/study/stats", get(routes::study::stats));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/content/classify", post(routes::content::classify))
        .route("/api/content/translate", post(routes::content::translate))
        .route("/api/content/compose", post(routes::content::compose))
        .route("/api/content/cache/stats", get(routes::content::cache_stats))
        .merge(learner_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = services::state_from_config(&config)?;

    tracing::info!(
        providers = ?state.orchestrator.provider_names(),
        cache = state.orchestrator.cache_name(),
        source = %config.source_lang,
        "Translation pipeline ready"
    );

    let app = build_router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
