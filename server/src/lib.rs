use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use pesona_core::dataset::load_records;
use pesona_core::present::{group_results, ProvinceGroup};
use pesona_core::{Bm25, DocRecord, Normalizer, SnowballNormalizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    20
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub provinces: Vec<ProvinceGroup>,
}

/// Read-only after startup; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<DocRecord>>,
    pub ranker: Arc<Bm25>,
    pub normalizer: Arc<SnowballNormalizer>,
}

pub fn build_app(data_path: String) -> Result<Router> {
    // Load the prepared dataset and build the ranker once at startup.
    let records = load_records(&data_path)?;
    let corpus: Vec<Vec<String>> = records.iter().map(|r| r.tokens.clone()).collect();
    let ranker = Bm25::build(&corpus);
    tracing::info!(num_docs = records.len(), "search index ready");

    let state = AppState {
        records: Arc::new(records),
        ranker: Arc::new(ranker),
        normalizer: Arc::new(SnowballNormalizer::indonesian()),
    };

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
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();

    let tokens = state.normalizer.normalize(&params.q);
    if tokens.is_empty() {
        return Json(SearchResponse {
            query: params.q,
            took_s: start.elapsed().as_secs_f64(),
            total_hits: 0,
            provinces: vec![],
        });
    }

    let k = params.k.max(1).min(100);
    let ranked = state.ranker.ranked(&tokens, k);
    // The ranker keeps zero-score candidates; the presentation layer drops
    // documents that share nothing with the query.
    let provinces = group_results(&state.records, &ranked, &tokens, state.normalizer.as_ref());
    let total_hits = provinces
        .iter()
        .map(|g| g.attractions.len() + g.dishes.len())
        .sum();

    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_hits,
        provinces,
    })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<usize>,
) -> Json<serde_json::Value> {
    match state.records.get(doc_id) {
        Some(record) => Json(serde_json::json!({
            "doc_id": doc_id,
            "provinsi": record.province,
            "nama": record.name,
            "original_konten": record.content,
            "gambar": record.image,
        })),
        None => Json(serde_json::json!({ "error": "not found" })),
    }
}
