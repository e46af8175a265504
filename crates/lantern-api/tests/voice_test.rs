//! Integration tests for the voice/SMS webhook.

mod common;

use axum::http::StatusCode;
use lantern_test_support::{RunnerCall, ScriptedChatApi, ScriptedGameRunner};

fn webhook(caller: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "session": {
            "to": { "channel": "TEXT" },
            "from": { "e164Id": caller },
            "initialText": text,
        }
    })
}

#[tokio::test]
async fn test_new_session_gets_intro_without_save_or_delete() {
    // Session "abc", no existing process, restore misses: the create
    // response's introductory text is the whole answer.
    let test = common::build_app(
        ScriptedGameRunner::fresh_session("1", "West of House. There is a mailbox here."),
        ScriptedChatApi::default(),
        Some(common::bot_identity()),
        None,
    );

    let (status, json) = common::post_json(test.app, "/tropo", &webhook("abc", "look")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["tropo"][0]["say"]["value"],
        "West of House. There is a mailbox here."
    );

    let calls = test.runner.calls();
    assert!(calls.contains(&RunnerCall::Spawn {
        game: "zork".to_owned(),
        label: "abc".to_owned(),
    }));
    assert!(!calls.iter().any(|c| matches!(c, RunnerCall::Save { .. })));
    assert!(!calls.iter().any(|c| matches!(c, RunnerCall::Delete { .. })));
}

#[tokio::test]
async fn test_continuing_session_acts_on_restored_pid_then_saves_and_deletes() {
    // Restore answers 200 for pid 7: action, save, and (eventually)
    // delete all target pid 7, and the action text is the reply.
    let test = common::build_app(
        ScriptedGameRunner::continuing_session("7", "You are carrying a leaflet."),
        ScriptedChatApi::default(),
        Some(common::bot_identity()),
        None,
    );

    let (status, json) =
        common::post_json(test.app, "/tropo", &webhook("abc", "inventory")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tropo"][0]["say"]["value"], "You are carrying a leaflet.");

    common::wait_for_delete(&test.runner).await;
    let calls = test.runner.calls();
    assert!(calls.contains(&RunnerCall::Action {
        pid: "7".to_owned(),
        action: "inventory".to_owned(),
    }));
    assert!(calls.contains(&RunnerCall::Save { pid: "7".to_owned() }));
    assert!(calls.contains(&RunnerCall::Delete { pid: "7".to_owned() }));
}

#[tokio::test]
async fn test_blocked_command_over_sms_is_refused() {
    let test = common::build_app(
        ScriptedGameRunner::continuing_session("7", "unreachable"),
        ScriptedChatApi::default(),
        Some(common::bot_identity()),
        None,
    );

    let (_, json) = common::post_json(test.app, "/tropo", &webhook("abc", "restart")).await;

    let say = json["tropo"][0]["say"]["value"].as_str().unwrap();
    assert!(say.contains("saved after every move"), "unexpected reply: {say}");
    assert!(
        !test
            .runner
            .calls()
            .iter()
            .any(|c| matches!(c, RunnerCall::Action { .. }))
    );
}

#[tokio::test]
async fn test_runner_outage_becomes_spoken_apology() {
    let test = common::build_app(
        ScriptedGameRunner::fresh_session("1", "intro")
            .failing_at(lantern_test_support::FailPoint::List),
        ScriptedChatApi::default(),
        Some(common::bot_identity()),
        None,
    );

    let (status, json) = common::post_json(test.app, "/tropo", &webhook("abc", "look")).await;

    assert_eq!(status, StatusCode::OK);
    let say = json["tropo"][0]["say"]["value"].as_str().unwrap();
    assert!(say.contains("went wrong"), "unexpected reply: {say}");
}
