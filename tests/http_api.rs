//! HTTP API tests driving the axum router without binding a socket

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rating_ledger::config::AppConfig;
use rating_ledger::service::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

fn test_app() -> Router {
    let state = AppState::new(AppConfig::default()).expect("Failed to build app state");
    create_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn create_profile(app: &Router, username: &str) -> i64 {
    let (status, body) = post(
        app,
        "/chess/profiles",
        json!({
            "username": username,
            "name": format!("{} Example", username),
            "profile_url": format!("https://lichess.org/@/{}", username)
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_record_result_endpoint() {
    let app = test_app();
    let alice = create_profile(&app, "alice").await;
    let bob = create_profile(&app, "bob").await;

    let (status, body) = post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": bob,
            "game_type": "blitz",
            "a_won": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["player_a"]["current_rating"], 1216);
    assert_eq!(body["player_a"]["highest_rating"], 1216);
    assert_eq!(body["player_a"]["games_won"], 1);
    assert_eq!(body["player_b"]["current_rating"], 1184);
    assert_eq!(body["player_b"]["games_played"], 1);
    assert_eq!(body["player_b"]["game_type"], "blitz");
}

#[tokio::test]
async fn test_record_result_unknown_profile() {
    let app = test_app();
    let alice = create_profile(&app, "alice").await;

    let (status, body) = post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": 77,
            "game_type": "rapid",
            "a_won": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    // Nothing was materialized for the known player
    let (_, full) = get(&app, "/chess/profiles/alice/full").await;
    let rapid = full["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["game_type"] == "rapid")
        .unwrap();
    assert_eq!(rapid["games_played"], 0);
    assert_eq!(rapid["current_rating"], Value::Null);
}

#[tokio::test]
async fn test_record_result_rejects_bad_input() {
    let app = test_app();
    let alice = create_profile(&app, "alice").await;
    let bob = create_profile(&app, "bob").await;

    let (status, body) = post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": bob,
            "game_type": "classical",
            "a_won": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_game_type");

    let (status, body) = post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": alice,
            "game_type": "bullet",
            "a_won": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_result");

    // Missing outcome is rejected by the JSON extractor
    let (status, _) = post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": bob,
            "game_type": "bullet",
            "a_won": null
        }),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_profile_endpoints() {
    let app = test_app();
    let id = create_profile(&app, "magnus").await;

    let (status, body) = get(&app, "/chess/profiles/magnus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["profile_url"], "https://lichess.org/@/magnus");

    let (status, body) = get(&app, "/chess/profiles/magnus/full").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "magnus");
    assert_eq!(body["stats"].as_array().unwrap().len(), 3);

    let (status, body) = get(&app, &format!("/chess/stats/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = get(&app, "/chess/profiles/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/chess/stats/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_profile_endpoint() {
    let app = test_app();

    let (status, body) = get(&app, "/chess/profiles/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let magnus = create_profile(&app, "magnus").await;
    let hikaru = create_profile(&app, "hikaru").await;

    let (status, body) = get(&app, "/chess/profiles/random").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();
    assert!(id == magnus || id == hikaru);
    assert!(body["username"] == "magnus" || body["username"] == "hikaru");
}

#[tokio::test]
async fn test_profile_creation_errors() {
    let app = test_app();
    create_profile(&app, "magnus").await;

    let (status, body) = post(
        &app,
        "/chess/profiles",
        json!({
            "username": "magnus",
            "name": "Someone Else",
            "profile_url": "https://lichess.org/@/someone"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, body) = post(
        &app,
        "/chess/profiles",
        json!({
            "username": "",
            "name": "Nobody",
            "profile_url": "https://lichess.org/@/nobody"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_profile");
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = test_app();
    let alice = create_profile(&app, "alice").await;
    let bob = create_profile(&app, "bob").await;
    post(
        &app,
        "/chess/results",
        json!({
            "profile_a": alice,
            "profile_b": bob,
            "game_type": "bullet",
            "a_won": false
        }),
    )
    .await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["stats"]["profiles"], 2);
    assert_eq!(body["stats"]["stats_rows"], 6);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("rating_ledger_results_recorded_total{game_type=\"bullet\"} 1"));
    assert!(text.contains("rating_ledger_profiles_created_total 2"));
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "rating-ledger");
    assert_eq!(body["rating"]["k_factor"], 32.0);
}
