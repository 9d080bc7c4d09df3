//! API integration tests, driving the router in-process

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookcat::{
    api,
    config::{AppConfig, StorageBackend},
    models::similar::SimilarBook,
    repository::{memory::MemoryBlobStore, BlobStore, Repository},
    services::{similar::SimilarBooksLookup, Services},
    AppResult, AppState,
};

/// Lookup that answers with nothing
struct NoSimilarBooks;

#[async_trait]
impl SimilarBooksLookup for NoSimilarBooks {
    async fn search(&self, _query: &str) -> AppResult<Vec<SimilarBook>> {
        Ok(Vec::new())
    }
}

async fn app_with_store(store: Arc<MemoryBlobStore>) -> Router {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    let repository = Repository::new(store, "books", "loans");
    let services = Services::new(repository, Arc::new(NoSimilarBooks), &config.lookup).await;
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn app() -> Router {
    app_with_store(Arc::new(MemoryBlobStore::default())).await
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri))
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn add_book(app: &Router, title: &str, author: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/books",
        Some(json!({ "title": title, "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("No id in response").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_add_and_filter_books() {
    let app = app().await;
    let dune = add_book(&app, "Dune", "X").await;
    let foo = add_book(&app, "Foo", "X").await;

    let (_, page) = call(&app, Method::GET, "/catalog", None).await;
    assert_eq!(page["authors"], json!(["X"]));
    assert_eq!(page["books"][0]["id"], dune);
    assert_eq!(page["books"][1]["id"], foo);
    assert_eq!(page["books"][0]["price"], "N/A");

    let (_, page) = call(&app, Method::PUT, "/catalog/filter", Some(json!({ "author": "Y" }))).await;
    assert_eq!(page["books"], json!([]));

    let (_, page) = call(&app, Method::PUT, "/catalog/filter", Some(json!({ "author": "X" }))).await;
    assert_eq!(page["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_selection_is_exclusive() {
    let app = app().await;
    let a = add_book(&app, "A", "X").await;
    let b = add_book(&app, "B", "X").await;

    call(&app, Method::POST, &format!("/books/{}/select", a), None).await;
    let (_, page) = call(&app, Method::POST, &format!("/books/{}/select", b), None).await;

    let selected: Vec<&Value> = page["books"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|book| book["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["id"], b);
}

#[tokio::test]
async fn test_edit_requires_selection() {
    let app = app().await;
    add_book(&app, "Dune", "X").await;

    let (status, body) = call(&app, Method::POST, "/catalog/form/edit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select a book to edit");
}

#[tokio::test]
async fn test_edit_selected_book() {
    let app = app().await;
    let id = add_book(&app, "Dune", "X").await;
    call(&app, Method::POST, &format!("/books/{}/select", id), None).await;

    let (status, form) = call(&app, Method::POST, "/catalog/form/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["mode"], "edit");
    assert_eq!(form["prefill"]["title"], "Dune");

    let (_, result) = call(
        &app,
        Method::POST,
        "/catalog/form",
        Some(json!({ "title": "Dune Messiah", "author": "X" })),
    )
    .await;
    assert_eq!(result["id"], id);

    let (_, page) = call(&app, Method::GET, "/catalog", None).await;
    assert_eq!(page["books"][0]["title"], "Dune Messiah");
    assert_eq!(page["books"][0]["selected"], false);
}

#[tokio::test]
async fn test_submit_without_open_form() {
    let app = app().await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/catalog/form",
        Some(json!({ "title": "Dune", "author": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No form is open");

    let (_, page) = call(&app, Method::GET, "/catalog", None).await;
    assert_eq!(page["books"], json!([]));

    call(&app, Method::POST, "/catalog/form/add", None).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/catalog/form",
        Some(json!({ "title": "Dune", "author": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
}

#[tokio::test]
async fn test_update_unknown_book_is_noop() {
    let app = app().await;
    let (status, body) = call(&app, Method::PUT, "/books/missing", Some(json!({ "title": "T" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);

    let (status, body) = call(&app, Method::DELETE, "/books/missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);
}

#[tokio::test]
async fn test_loan_lifecycle() {
    let app = app().await;
    let a = add_book(&app, "Dune", "X").await;
    let b = add_book(&app, "Foo", "X").await;

    let (status, loan) = call(
        &app,
        Method::POST,
        "/loans",
        Some(json!({ "borrower": "Alice", "bookId": a, "weeks": "9" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["weeks"], 4);

    let (status, _) = call(
        &app,
        Method::POST,
        "/loans",
        Some(json!({ "borrower": "Bob", "bookId": a, "weeks": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/loans",
        Some(json!({ "borrower": "  ", "bookId": b })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, page) = call(&app, Method::GET, "/loans", None).await;
    assert_eq!(page["eligibleBooks"].as_array().unwrap().len(), 1);
    assert_eq!(page["eligibleBooks"][0]["id"], b);

    // Non-integer weeks never reject the request
    let c = add_book(&app, "Bar", "X").await;
    let (status, loan) = call(
        &app,
        Method::POST,
        "/loans",
        Some(json!({ "borrower": "Carol", "bookId": c, "weeks": 2.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["weeks"], 2);

    let (_, page) = call(&app, Method::GET, "/loans", None).await;
    assert_eq!(page["eligibleBooks"].as_array().unwrap().len(), 1);
    assert_eq!(page["eligibleBooks"][0]["id"], b);
    assert_eq!(page["loans"][0]["title"], "Dune");
    assert_eq!(page["allBorrowed"], false);

    let (_, catalog) = call(&app, Method::GET, "/catalog", None).await;
    assert_eq!(catalog["books"][0]["onLoan"], true);
    assert_eq!(catalog["books"][1]["onLoan"], false);

    // Deleting the selected book drops its loan
    call(&app, Method::POST, &format!("/books/{}/select", a), None).await;
    let (_, deleted) = call(&app, Method::DELETE, "/catalog/selected", None).await;
    assert_eq!(deleted["id"], a);

    let (_, page) = call(&app, Method::GET, "/loans", None).await;
    assert_eq!(page["loans"].as_array().unwrap().len(), 1);
    assert_eq!(page["loans"][0]["bookId"], c);
}

#[tokio::test]
async fn test_view_transitions() {
    let app = app().await;
    let id = add_book(&app, "Dune", "X").await;

    let (_, state) = call(&app, Method::GET, "/view", None).await;
    assert_eq!(state["view"]["view"], "catalog");

    let (status, state) = call(&app, Method::POST, "/view/loans", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["view"]["view"], "loan_management");

    let (status, _) = call(&app, Method::POST, &format!("/view/details/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, Method::DELETE, "/view/loans", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, state) = call(&app, Method::POST, &format!("/view/details/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["view"]["view"], "book_detail");
    assert_eq!(state["view"]["bookId"], id);
    assert_eq!(state["detail"]["book"]["title"], "Dune");

    let (status, state) = call(&app, Method::DELETE, "/view/details", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["view"]["view"], "catalog");
    assert_eq!(state["detail"], Value::Null);

    let (status, _) = call(&app, Method::POST, "/view/details/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let store = Arc::new(MemoryBlobStore::default());
    let app = app_with_store(store.clone()).await;
    let a = add_book(&app, "Dune", "X").await;
    add_book(&app, "Foo", "Y").await;
    call(
        &app,
        Method::POST,
        "/loans",
        Some(json!({ "borrower": "Alice", "bookId": a })),
    )
    .await;
    let (_, before) = call(&app, Method::GET, "/loans", None).await;

    let restarted = app_with_store(store.clone()).await;
    let (_, after) = call(&restarted, Method::GET, "/loans", None).await;
    assert_eq!(before, after);

    let (_, catalog) = call(&restarted, Method::GET, "/catalog", None).await;
    assert_eq!(catalog["authors"], json!(["X", "Y"]));
}

#[tokio::test]
async fn test_corrupt_storage_starts_empty() {
    let store = Arc::new(MemoryBlobStore::default());
    store.set("books", "not json").await.unwrap();
    store.set("loans", "{").await.unwrap();

    let app = app_with_store(store).await;
    let (status, page) = call(&app, Method::GET, "/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["books"], json!([]));
}
