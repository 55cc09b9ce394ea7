use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pesona_core::dataset::{save_records, Category, DocRecord};
use serde_json::Value;
use tempfile::tempdir;
use tower::ServiceExt;

fn record(province: &str, category: Category, name: &str, content: &str, tokens: &[&str]) -> DocRecord {
    DocRecord {
        province: province.into(),
        category,
        name: name.into(),
        content: content.into(),
        tokens: tokens.iter().map(|s| s.to_string()).collect(),
        image: String::new(),
    }
}

fn write_tiny_dataset(path: &std::path::Path) {
    let records = vec![
        record(
            "Bali",
            Category::Wisata,
            "Pantai Kuta",
            "Wisata Pantai Kuta di Bali sangat indah",
            &["wisata", "pantai", "kuta", "bali", "indah"],
        ),
        record(
            "Bali",
            Category::Wisata,
            "Pantai Sanur",
            "Pantai Sanur menawarkan matahari terbit yang indah",
            &["pantai", "sanur", "indah", "matahari", "terbit"],
        ),
        record(
            "Bali",
            Category::Kuliner,
            "Kuliner Bali",
            "Wisata kuliner di Bali lezat dan murah",
            &["wisata", "kuliner", "bali", "lezat", "murah"],
        ),
        record(
            "Jawa Timur",
            Category::Wisata,
            "Gunung Bromo",
            "Gunung berapi dengan kawah aktif",
            &["gunung", "berapi", "kawah", "aktif"],
        ),
        record(
            "Jawa Barat",
            Category::Kuliner,
            "Kopi Luwak",
            "Kopi khas pegunungan",
            &["kopi", "luwak", "khas"],
        ),
        record(
            "Madura",
            Category::Kuliner,
            "Sate Ayam",
            "Sate ayam dengan bumbu kacang",
            &["sate", "ayam", "bumbu", "kacang"],
        ),
    ];
    save_records(path, &records).unwrap();
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn build_test_app() -> (tempfile::TempDir, Router) {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data_siap_pakai.json");
    write_tiny_dataset(&data);
    let app = pesona_server::build_app(data.to_string_lossy().to_string()).unwrap();
    (dir, app)
}

#[tokio::test]
async fn search_returns_grouped_relevant_results() {
    let (_dir, app) = build_test_app();
    let (status, json) = call(app, "/search?q=wisata%20pantai%20indah%20bali&k=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"].as_u64().unwrap(), 3);

    let provinces = json["provinces"].as_array().unwrap();
    // The Bromo document shares no token with the query and is filtered out.
    assert_eq!(provinces.len(), 1);
    assert_eq!(provinces[0]["nama"], "Bali");

    let attractions = provinces[0]["objek_pariwisata"].as_array().unwrap();
    let dishes = provinces[0]["makanan_khas"].as_array().unwrap();
    assert_eq!(attractions.len(), 2);
    assert_eq!(dishes.len(), 1);
    // Every query term has df = 2 of N = 6, so IDF is positive and Kuta
    // (all four terms) outranks Sanur (two terms).
    assert_eq!(attractions[0]["nama"], "Pantai Kuta");
    assert_eq!(attractions[1]["nama"], "Pantai Sanur");
    // Highlighting wraps the matched original words.
    let kuta = attractions[0]["konten"].as_str().unwrap();
    assert!(kuta.contains("<mark>Wisata</mark>"));
    assert!(kuta.contains("<mark>Bali</mark>"));
    assert!(kuta.contains("<mark>indah</mark>"));
}

#[tokio::test]
async fn stopword_only_query_yields_no_hits() {
    let (_dir, app) = build_test_app();
    let (status, json) = call(app, "/search?q=yang%20di%20dan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"].as_u64().unwrap(), 0);
    assert!(json["provinces"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn no_overlap_query_yields_no_hits() {
    let (_dir, app) = build_test_app();
    let (status, json) = call(app, "/search?q=salju%20gurun").await;
    assert_eq!(status, StatusCode::OK);
    // The ranker still returns candidates; the presentation filter drops all
    // of them.
    assert_eq!(json["total_hits"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn doc_endpoint_returns_record_or_error() {
    let (_dir, app) = build_test_app();
    let (status, json) = call(app, "/doc/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["nama"], "Pantai Kuta");
    assert_eq!(json["provinsi"], "Bali");

    let (_dir2, app2) = build_test_app();
    let (_, json) = call(app2, "/doc/99").await;
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let (_dir, app) = build_test_app();
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
