//! `reqwest`-backed game-runner client.

use async_trait::async_trait;
use lantern_core::action::Action;
use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::{GameListing, GameRunner, RestoreOutcome, SpawnedGame};

/// Save-slot name used for every session. The game-runner keys the actual
/// file by the process label, so one fixed slot name suffices.
const SAVE_FILE: &str = "save";

/// Production [`GameRunner`] talking to the game-runner's REST API.
#[derive(Debug, Clone)]
pub struct HttpGameRunner {
    client: Client,
    base_url: String,
}

impl HttpGameRunner {
    /// Creates a client for the runner at `base_url` (scheme + authority,
    /// with or without a trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// The runner reports pids as JSON numbers; older builds used strings.
/// Either way they are opaque to this system.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPid {
    Num(i64),
    Text(String),
}

impl RawPid {
    fn into_string(self) -> String {
        match self {
            Self::Num(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    #[serde(default)]
    pid: Option<RawPid>,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct SpawnResponse {
    pid: RawPid,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    #[serde(default)]
    data: String,
}

fn transport(context: &str, err: &reqwest::Error) -> BridgeError {
    BridgeError::Transport(format!("{context}: {err}"))
}

fn bad_status(context: &str, status: reqwest::StatusCode) -> BridgeError {
    BridgeError::Transport(format!("{context}: game-runner returned HTTP {status}"))
}

fn bad_payload(context: &str, err: &reqwest::Error) -> BridgeError {
    BridgeError::Protocol(format!("{context}: unparseable response: {err}"))
}

#[async_trait]
impl GameRunner for HttpGameRunner {
    async fn list_games(&self) -> Result<Vec<GameListing>, BridgeError> {
        let resp = self
            .client
            .get(self.url("/games/"))
            .send()
            .await
            .map_err(|e| transport("list games", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("list games", resp.status()));
        }
        let entries: Vec<ListingEntry> =
            resp.json().await.map_err(|e| bad_payload("list games", &e))?;

        debug!(count = entries.len(), "listed game processes");

        Ok(entries
            .into_iter()
            .map(|e| GameListing {
                pid: e.pid.map(RawPid::into_string),
                label: e.label,
            })
            .collect())
    }

    async fn spawn_game(
        &self,
        game: &str,
        label: &SessionLabel,
    ) -> Result<SpawnedGame, BridgeError> {
        debug!(game, label = %label, "spawning game process");
        let resp = self
            .client
            .post(self.url("/games/"))
            .json(&json!({ "game": game, "label": label.as_str() }))
            .send()
            .await
            .map_err(|e| transport("spawn game", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("spawn game", resp.status()));
        }
        let spawned: SpawnResponse =
            resp.json().await.map_err(|e| bad_payload("spawn game", &e))?;
        Ok(SpawnedGame {
            pid: spawned.pid.into_string(),
            reply: spawned.data,
        })
    }

    async fn restore_game(&self, pid: &str) -> Result<RestoreOutcome, BridgeError> {
        // Tolerant mode: a non-200 here is the normal "brand-new session"
        // signal, so only transport-level failures become errors.
        let resp = self
            .client
            .post(self.url(&format!("/games/{pid}/restore")))
            .json(&json!({ "file": SAVE_FILE }))
            .send()
            .await
            .map_err(|e| transport("restore game", &e))?;
        let status = resp.status();
        debug!(pid, %status, "restore attempted");
        if status == reqwest::StatusCode::OK {
            Ok(RestoreOutcome::Restored)
        } else {
            Ok(RestoreOutcome::NoSavedGame)
        }
    }

    async fn send_action(&self, pid: &str, action: &Action) -> Result<String, BridgeError> {
        debug!(pid, action = action.as_str(), "forwarding action");
        let resp = self
            .client
            .post(self.url(&format!("/games/{pid}/action")))
            .json(&json!({ "action": action.as_str() }))
            .send()
            .await
            .map_err(|e| transport("send action", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("send action", resp.status()));
        }
        let body: ActionResponse =
            resp.json().await.map_err(|e| bad_payload("send action", &e))?;
        Ok(body.data)
    }

    async fn save_game(&self, pid: &str) -> Result<(), BridgeError> {
        debug!(pid, "saving game");
        let resp = self
            .client
            .post(self.url(&format!("/games/{pid}/save")))
            .json(&json!({ "file": SAVE_FILE }))
            .send()
            .await
            .map_err(|e| transport("save game", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("save game", resp.status()));
        }
        Ok(())
    }

    async fn delete_game(&self, pid: &str) -> Result<(), BridgeError> {
        debug!(pid, "deleting game process");
        let resp = self
            .client
            .delete(self.url(&format!("/games/{pid}")))
            .send()
            .await
            .map_err(|e| transport("delete game", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("delete game", resp.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_games_parses_entries_and_missing_pids() {
        // Arrange
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"pid": 7, "label": "abc"}, {"label": "ghost"}]"#)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        // Act
        let games = runner.list_games().await.unwrap();

        // Assert
        mock.assert_async().await;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].pid.as_deref(), Some("7"));
        assert_eq!(games[0].label, "abc");
        assert_eq!(games[1].pid, None);
    }

    #[tokio::test]
    async fn test_list_games_failure_is_a_hard_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/games/")
            .with_status(502)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let err = runner.list_games().await.unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_spawn_game_posts_game_and_label() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/games/")
            .match_body(mockito::Matcher::Json(
                json!({ "game": "zork", "label": "abc" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"pid": 42, "data": "West of House"}"#)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let spawned = runner
            .spawn_game("zork", &SessionLabel::from_caller_id("abc"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(spawned.pid, "42");
        assert_eq!(spawned.reply, "West of House");
    }

    #[tokio::test]
    async fn test_restore_200_means_continuing_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/games/7/restore")
            .match_body(mockito::Matcher::Json(json!({ "file": "save" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"pid": 7}"#)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let outcome = runner.restore_game("7").await.unwrap();
        assert_eq!(outcome, RestoreOutcome::Restored);
    }

    #[tokio::test]
    async fn test_restore_non_200_means_no_saved_game() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/games/7/restore")
            .with_status(404)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let outcome = runner.restore_game("7").await.unwrap();
        assert_eq!(outcome, RestoreOutcome::NoSavedGame);
    }

    #[tokio::test]
    async fn test_restore_transport_failure_is_an_error() {
        // Nothing is listening on this port.
        let runner = HttpGameRunner::new("http://127.0.0.1:1");

        let err = runner.restore_game("7").await.unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_send_action_returns_interpreter_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/games/7/action")
            .match_body(mockito::Matcher::Json(json!({ "action": "inventory" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": "You are carrying a brass lantern."}"#)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let reply = runner
            .send_action("7", &Action::parse("inventory"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "You are carrying a brass lantern.");
    }

    #[tokio::test]
    async fn test_save_and_delete_hit_expected_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let save = server
            .mock("POST", "/games/7/save")
            .match_body(mockito::Matcher::Json(json!({ "file": "save" })))
            .with_status(200)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/games/7")
            .with_status(200)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        runner.save_game("7").await.unwrap();
        runner.delete_game("7").await.unwrap();

        save.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_failure_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/games/7/save")
            .with_status(500)
            .create_async()
            .await;
        let runner = HttpGameRunner::new(server.url());

        let err = runner.save_game("7").await.unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)), "got {err:?}");
    }
}
