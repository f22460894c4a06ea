//! HTTP API Tests
//!
//! Drives the full router in-process with `oneshot` requests.
//!
//! ## Test Scopes
//! - **Lookup**: Keyword search, headword-first with definition fallback.
//! - **Editing**: Word and phrase creation, get-by-id.
//! - **Test routes**: Embedded dictionary search and seeding.
//! - **Production**: Editing, test and seeding routes are not mounted.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use clap::Parser;
use http_body_util::BodyExt;
use igbo_api::app::build_router;
use igbo_api::config::Config;
use igbo_api::dictionary::embedded::Dictionary;
use igbo_api::entities::repository::Repository;
use igbo_api::shutdown::Shutdown;
use igbo_api::storage::Connection;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(env: &str) -> (Router, Arc<Repository>) {
    let config = Config::parse_from(["igbo_api", "--env", env, "--index-ready-timeout-secs", "2"]);
    let repo = Repository::new(Connection::open("memory://api-tests").unwrap());
    let dictionary = Arc::new(Dictionary::embedded().unwrap());

    let router = build_router(repo.clone(), dictionary, Arc::new(config), Shutdown::new());
    (router, repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn headwords(words: &Value) -> Vec<&str> {
    words
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect()
}

async fn populate(app: &Router) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/test/populate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

// ============================================================
// LOOKUP
// ============================================================

#[tokio::test]
async fn test_root() {
    let (app, _) = app("development");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Hello World!");
}

#[tokio::test]
async fn test_search_after_populate() {
    let (app, repo) = app("development");
    populate(&app).await;
    assert_eq!(repo.headword_count(), 8);

    let (status, words) = get(&app, "/api/v1/words?keyword=ulo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headwords(&words), vec!["ụlọ"]);

    let phrases = words[0]["phrases"].as_array().unwrap();
    assert_eq!(phrases.len(), 2);
    assert_eq!(phrases[0]["examples"].as_array().unwrap().len(), 1);
    assert!(phrases[0]["examples"][0]["example"].is_string());
}

#[tokio::test]
async fn test_search_falls_back_to_definitions() {
    let (app, _) = app("development");
    populate(&app).await;

    let (status, words) = get(&app, "/api/v1/words?keyword=water").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headwords(&words), vec!["mmiri"]);

    let (_, words) = get(&app, "/api/v1/words?keyword=to%20hold").await;
    assert_eq!(headwords(&words), vec!["ji"]);
}

#[tokio::test]
async fn test_search_without_keyword_returns_every_word() {
    let (app, _) = app("development");
    populate(&app).await;

    let (_, all) = get(&app, "/api/v1/words").await;
    assert_eq!(all.as_array().unwrap().len(), 9);

    let (_, empty) = get(&app, "/api/v1/words?keyword=").await;
    assert_eq!(empty.as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_search_seeded_word_class_defaults() {
    let (app, _) = app("development");
    populate(&app).await;

    let (_, words) = get(&app, "/api/v1/words?keyword=ego").await;
    assert_eq!(words[0]["definitions"][0]["wordClass"], "NNC");
    assert_eq!(words[0]["dialects"]["ego-dialect"]["dialects"], json!(["NSA"]));
}

// ============================================================
// EDITING
// ============================================================

#[tokio::test]
async fn test_create_and_fetch_word() {
    let (app, _) = app("development");

    let payload = json!({
        "word": "nwa",
        "wordClass": "NNC",
        "definitions": [{"wordClass": "NNC", "definitions": ["child"]}],
        "examples": ["Nwa ahụ na-ebe ákwá."],
        "phrases": {
            "nwa nne": {"definitions": ["sibling"], "examples": ["Ọ bụ nwa nne m."]}
        }
    });
    let (status, word) = send(&app, Method::POST, "/api/v1/words", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(word["phrases"].as_array().unwrap().len(), 1);
    assert_eq!(word["examples"].as_array().unwrap().len(), 1);

    let id = word["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/v1/words/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["phrases"][0]["phrase"], "nwa nne");

    let example_id = word["examples"][0].as_str().unwrap();
    let (status, example) = get(&app, &format!("/api/v1/examples/{example_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(example["parentWord"], id);

    let (_, found) = get(&app, "/api/v1/words?keyword=child").await;
    assert_eq!(headwords(&found), vec!["nwa"]);
}

#[tokio::test]
async fn test_create_word_keeps_phrases_in_request_order() {
    let (app, _) = app("development");

    // Raw body: `json!` objects are sorted maps.
    let body = r#"{
        "word": "ụlọ",
        "phrases": {
            "ụlọ ọgwụ": {"definitions": ["hospital"]},
            "ụlọ akwụkwọ": {"definitions": ["school"]},
            "ụlọ azụmahịa": {"definitions": ["shop"]}
        }
    }"#;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/words")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let word: Value = serde_json::from_slice(&bytes).unwrap();

    let id = word["id"].as_str().unwrap();
    let (_, fetched) = get(&app, &format!("/api/v1/words/{id}")).await;
    let texts: Vec<&str> = fetched["phrases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["phrase"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["ụlọ ọgwụ", "ụlọ akwụkwọ", "ụlọ azụmahịa"]);
}

#[tokio::test]
async fn test_create_word_rejects_blank_example() {
    let (app, repo) = app("development");

    let payload = json!({"word": "nwa", "examples": ["  "]});
    let (status, body) = send(&app, Method::POST, "/api/v1/words", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(repo.words().count(), 0);
}

#[tokio::test]
async fn test_create_phrase() {
    let (app, _) = app("development");

    let (_, word) = send(
        &app,
        Method::POST,
        "/api/v1/words",
        Some(json!({"word": "ụlọ"})),
    )
    .await;
    let word_id = word["id"].as_str().unwrap();

    let payload = json!({
        "phrase": "ụlọ akwụkwọ",
        "word": word_id,
        "definitions": ["school"],
        "examples": ["Ọ na-aga ụlọ akwụkwọ."]
    });
    let (status, phrase) = send(&app, Method::POST, "/api/v1/phrases", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let phrase_id = phrase["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/v1/phrases/{phrase_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["examples"].as_array().unwrap().len(), 1);

    let (_, parent) = get(&app, &format!("/api/v1/words/{word_id}")).await;
    assert_eq!(parent["phrases"][0]["id"], phrase_id);
}

#[tokio::test]
async fn test_create_phrase_for_missing_word() {
    let (app, _) = app("development");

    let payload = json!({"phrase": "ụlọ akwụkwọ", "word": "missing"});
    let (status, _) = send(&app, Method::POST, "/api/v1/phrases", Some(payload)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_ids() {
    let (app, _) = app("development");

    for uri in [
        "/api/v1/words/nope",
        "/api/v1/phrases/nope",
        "/api/v1/examples/nope",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }
}

// ============================================================
// TEST ROUTES
// ============================================================

#[tokio::test]
async fn test_dictionary_search_requires_keyword() {
    let (app, _) = app("development");

    let (status, body) = get(&app, "/api/v1/test/words").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No term provided"}));

    let (status, _) = get(&app, "/api/v1/test/words?keyword=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dictionary_search() {
    let (app, _) = app("test");

    let (status, body) = get(&app, "/api/v1/test/words?keyword=ulo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["ụlọ"]);

    let (_, body) = get(&app, "/api/v1/test/words?keyword=ji").await;
    assert_eq!(body["ji"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_populate_replaces_existing_words() {
    let (app, repo) = app("development");

    send(&app, Method::POST, "/api/v1/words", Some(json!({"word": "nwa"}))).await;
    populate(&app).await;
    populate(&app).await;

    assert_eq!(repo.words().count(), 9);
    let (_, found) = get(&app, "/api/v1/words?keyword=nwa").await;
    assert!(found.as_array().unwrap().is_empty());
}

// ============================================================
// PRODUCTION
// ============================================================

#[tokio::test]
async fn test_production_hides_editing_and_test_routes() {
    let (app, _) = app("production");

    let (status, _) = get(&app, "/api/v1/test/populate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/v1/test/words?keyword=ji").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/v1/words", Some(json!({"word": "nwa"}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/phrases",
        Some(json!({"phrase": "x", "word": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, words) = get(&app, "/api/v1/words").await;
    assert_eq!(status, StatusCode::OK);
    assert!(words.as_array().unwrap().is_empty());
}
