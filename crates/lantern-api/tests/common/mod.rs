//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lantern_api::state::AppState;
use lantern_chat::{BotIdentity, ChatApi};
use lantern_dispatch::TurnConfig;
use lantern_test_support::{RunnerCall, ScriptedChatApi, ScriptedGameRunner};
use lantern_zmachine::GameRunner;
use tower::ServiceExt;

/// Identity the test bot runs under.
pub fn bot_identity() -> BotIdentity {
    BotIdentity {
        person_id: "bot-person-id".to_owned(),
        display_name: "Lantern".to_owned(),
    }
}

/// Fully wired test application plus handles to its fakes.
pub struct TestApp {
    pub runner: Arc<ScriptedGameRunner>,
    pub chat: Arc<ScriptedChatApi>,
    pub app: Router,
}

/// Build the full app router over scripted fakes. Uses the same assembly
/// as `main.rs`.
pub fn build_app(
    runner: ScriptedGameRunner,
    chat: ScriptedChatApi,
    identity: Option<BotIdentity>,
    admin_contact: Option<String>,
) -> TestApp {
    let runner = Arc::new(runner);
    let chat = Arc::new(chat);
    let state = AppState::new(
        Arc::clone(&runner) as Arc<dyn GameRunner>,
        Arc::clone(&chat) as Arc<dyn ChatApi>,
        identity,
        TurnConfig::new("zork"),
        admin_contact,
    );
    TestApp {
        runner,
        chat,
        app: lantern_api::app(state),
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Waits for the fire-and-forget teardown task to hit the runner. The
/// reply path never blocks on deletion, so tests have to.
pub async fn wait_for_delete(runner: &ScriptedGameRunner) {
    for _ in 0..100 {
        if runner
            .calls()
            .iter()
            .any(|c| matches!(c, RunnerCall::Delete { .. }))
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("teardown never reached the game-runner; calls: {:?}", runner.calls());
}
