use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use dsa_core::persist::{load_corpus, IndexPaths};
use dsa_core::{DocId, ProblemFiles, Question, SearchEngine, SearchResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(alias = "q")]
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine<ProblemFiles>>,
    /// Fixed pause before each search reply; zero disables it.
    pub response_delay: Duration,
}

/// Load the index and build the router. Fails when the artifacts are inconsistent.
pub fn build_app(index_dir: &str, response_delay: Duration) -> Result<Router> {
    let index_paths = IndexPaths::new(index_dir);
    let corpus = load_corpus(&index_paths)?;
    let engine = SearchEngine::new(Arc::new(corpus), ProblemFiles::new(index_paths.problems_dir()));
    let app_state = AppState { engine: Arc::new(engine), response_delay };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/question/:id", get(question_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn internal_error(err: tokio::task::JoinError) -> ApiError {
    tracing::error!(error = %err, "search task failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": "internal error" })))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    // the corpus scan and text reads block; keep them off the async workers
    let engine = Arc::clone(&state.engine);
    let query = params.query.clone();
    let outcome = tokio::task::spawn_blocking(move || engine.search(&query)).await.map_err(internal_error)?;
    // an all-zero ranking is reported as no results
    let results = if outcome.any_non_zero { outcome.results } else { Vec::new() };
    let elapsed = start.elapsed();
    tracing::info!(query = %params.query, hits = results.len(), took_s = elapsed.as_secs_f64(), "search");

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }
    Ok(Json(SearchResponse { query: params.query, took_s: elapsed.as_secs_f64(), results }))
}

pub async fn question_handler(State(state): State<AppState>, Path(id): Path<DocId>) -> Result<Json<Question>, ApiError> {
    let engine = Arc::clone(&state.engine);
    match tokio::task::spawn_blocking(move || engine.question(id)).await.map_err(internal_error)? {
        Some(question) => Ok(Json(question)),
        None => {
            tracing::warn!(id, "question not available");
            Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))))
        }
    }
}
