pub mod session;

use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tse_core::{DocId, Hit, InvertedIndex, PageDir};

pub use session::{run_session, search, EmptyLinePolicy, SessionConfig, SessionStats};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Hit>,
}

/// Shared, read-only query state. The index is never mutated after load, so
/// handlers evaluate against it concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
    pub pages: Arc<PageDir>,
}

impl AppState {
    pub fn new(index: InvertedIndex, pages: PageDir) -> Self {
        Self { index: Arc::new(index), pages: Arc::new(pages) }
    }
}

/// Loads the index and page directory and builds the router.
pub fn build_app(index_file: &str, page_dir: &str) -> Result<Router> {
    let pages = PageDir::open(page_dir)?;
    let index = InvertedIndex::load(index_file)?;
    Ok(router(AppState::new(index, pages)))
}

pub fn router(state: AppState) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<serde_json::Value>)> {
    let start = std::time::Instant::now();
    let query = tse_core::Query::parse(&params.q)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": e.to_string() }))))?;

    let k = params.k.clamp(1, 100);
    let (total_hits, results) = search(&state.index, state.pages.as_ref(), &query, Some(k));
    tracing::debug!(query = %query, total_hits, "search");

    Ok(Json(SearchResponse { query: query.to_string(), took_s: start.elapsed().as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.pages.load_page(doc_id) {
        Ok(Some(page)) => Ok(Json(serde_json::json!({
            "doc_id": doc_id,
            "url": page.url,
            "depth": page.depth,
        }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!(doc_id, error = %e, "failed to load page");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
