use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use toy_store::{
    AppConfig, AppState, StoreError, StoreResult, Toy, ToyDraft, ToyFilter, ToyPage,
    ToyRepository, ToyStore, build_router,
};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    dir: TempDir,
}

fn config_for(dir: &TempDir) -> AppConfig {
    let public_dir = dir.path().join("public");
    let data_file = dir.path().join("data").join("toy.json");
    AppConfig::try_parse_from([
        "toy-store".to_string(),
        "--public-dir".to_string(),
        public_dir.display().to_string(),
        "--data-file".to_string(),
        data_file.display().to_string(),
    ])
    .expect("config should parse")
}

async fn app() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let config = config_for(&dir);
    fs::create_dir_all(&config.public_dir).unwrap();
    fs::write(
        config.public_dir.join("index.html"),
        "<!doctype html><title>Toys</title>",
    )
    .unwrap();

    let store = ToyStore::open(&config.data_file)
        .await
        .expect("store should open");
    let router = build_router(AppState::new(Arc::new(store)), &config);
    TestApp { router, dir }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    payload: Option<Value>,
) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn send_json(router: &Router, method: Method, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let (status, body) = send(router, method, uri, payload).await;
    let json = serde_json::from_str::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

async fn create(router: &Router, name: &str, price: f64, labels: &[&str]) -> Value {
    let (status, body) = send_json(
        router,
        Method::POST,
        "/api/toy",
        Some(json!({ "name": name, "price": price, "labels": labels })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn create_and_get_toy() {
    let app = app().await;

    let created = create(&app.router, "Talking Doll", 123.0, &["Doll", "Baby"]).await;
    let id = created["_id"].as_str().expect("created toy should have an id");
    assert_eq!(id.len(), 5);
    assert_eq!(created["inStock"], true);
    assert!(created["createdAt"].as_i64().is_some());

    let (status, fetched) = send_json(&app.router, Method::GET, &format!("/api/toy/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_accepts_string_price() {
    let app = app().await;

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/toy",
        Some(json!({ "name": "Ball", "price": "12", "labels": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 12.0);
}

#[tokio::test]
async fn create_persists_to_data_file() {
    let app = app().await;
    create(&app.router, "Kite", 19.5, &["Outdoor"]).await;

    let raw = fs::read_to_string(app.dir.path().join("data").join("toy.json")).unwrap();
    let stored: Vec<Toy> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Kite");
}

#[tokio::test]
async fn get_unknown_toy_is_bad_request_with_message() {
    let app = app().await;

    let (status, body) = send(&app.router, Method::GET, "/api/toy/nope1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Toy not found: nope1");
}

#[tokio::test]
async fn update_merges_body_fields() {
    let app = app().await;
    let created = create(&app.router, "Kite", 19.5, &["Outdoor"]).await;
    let id = created["_id"].as_str().unwrap();

    let (status, updated) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/toy/{id}"),
        Some(json!({ "price": 25 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], id);
    assert_eq!(updated["price"], 25.0);
    assert_eq!(updated["name"], "Kite");
    assert_eq!(updated["labels"], json!(["Outdoor"]));
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_unknown_toy_is_bad_request() {
    let app = app().await;

    let (status, body) = send(
        &app.router,
        Method::PUT,
        "/api/toy/nope1",
        Some(json!({ "name": "Ghost", "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cannot update toy");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/toy")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app.router, Method::POST, "/api/toy", Some(json!({ "price": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cannot add toy");
}

#[tokio::test]
async fn delete_removes_toy() {
    let app = app().await;
    let created = create(&app.router, "Kite", 19.5, &[]).await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = send(&app.router, Method::DELETE, &format!("/api/toy/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app.router, Method::GET, &format!("/api/toy/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app.router, Method::DELETE, &format!("/api/toy/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, format!("Cannot delete toy, Toy not found: {id}"));
}

#[tokio::test]
async fn list_filters_sorts_and_paginates() {
    let app = app().await;
    create(&app.router, "Red Racer", 40.0, &["red", "new"]).await;
    create(&app.router, "red ball", 15.0, &["red"]).await;
    create(&app.router, "Blue Kite", 30.0, &["new", "red"]).await;
    create(&app.router, "Puzzle", 22.0, &["Puzzle"]).await;

    let (status, page) = send_json(
        &app.router,
        Method::GET,
        "/api/toy?labels%5B%5D=red&labels%5B%5D=new&sortBy%5Btype%5D=price&sortBy%5BsortDir%5D=-1&pageIdx=0&inStock=&txt=",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = page["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(|toy| toy["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Red Racer", "Blue Kite"]);
    assert_eq!(page["maxPage"], 1);

    let (_, page) = send_json(&app.router, Method::GET, "/api/toy?txt=RED&pageIdx=abc", None).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_page_past_the_end_is_empty() {
    let app = app().await;
    for idx in 0..5 {
        create(&app.router, &format!("Car {idx}"), 1.0, &[]).await;
    }

    let (status, page) = send_json(&app.router, Method::GET, "/api/toy?pageIdx=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"], json!([]));
    assert_eq!(page["maxPage"], 1);
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index_html() {
    let app = app().await;

    let (status, body) = send(&app.router, Method::GET, "/toy/edit/abc12", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Toys</title>"));
}

#[tokio::test]
async fn cors_allows_configured_origin_with_credentials() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/toy")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

struct BrokenDisk;

#[async_trait]
impl ToyRepository for BrokenDisk {
    async fn query(&self, _filter: ToyFilter) -> StoreResult<ToyPage> {
        Err(StoreError::persistence("disk unavailable"))
    }

    async fn get(&self, id: &str) -> StoreResult<Toy> {
        Err(StoreError::not_found(id))
    }

    async fn save(&self, _draft: ToyDraft) -> StoreResult<Toy> {
        Err(StoreError::persistence("disk unavailable"))
    }

    async fn remove(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::persistence("disk unavailable"))
    }
}

#[tokio::test]
async fn persistence_failures_map_to_bad_request() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let router = build_router(AppState::new(Arc::new(BrokenDisk)), &config);

    let (status, body) = send(&router, Method::GET, "/api/toy", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cannot load toys");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/toy",
        Some(json!({ "name": "Ball", "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cannot add toy");

    let (status, body) = send(&router, Method::DELETE, "/api/toy/abcde", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cannot delete toy, Persistence error: disk unavailable");
}
