//! `reqwest`-backed chat platform client.

use async_trait::async_trait;
use lantern_core::error::BridgeError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::{BotIdentity, ChatApi, ChatMessage};

/// Production [`ChatApi`] using bearer-token authentication.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpChatApi {
    /// Creates a client for the chat API at `base_url` with `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct PersonResponse {
    id: String,
    #[serde(rename = "displayName", default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    #[serde(rename = "roomId")]
    room_id: String,
    #[serde(rename = "personId", default)]
    person_id: String,
    #[serde(default)]
    text: String,
}

fn transport(context: &str, err: &reqwest::Error) -> BridgeError {
    BridgeError::Transport(format!("{context}: {err}"))
}

fn bad_status(context: &str, status: reqwest::StatusCode) -> BridgeError {
    BridgeError::Transport(format!("{context}: chat API returned HTTP {status}"))
}

fn bad_payload(context: &str, err: &reqwest::Error) -> BridgeError {
    BridgeError::Protocol(format!("{context}: unparseable response: {err}"))
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn own_identity(&self) -> Result<BotIdentity, BridgeError> {
        let resp = self
            .client
            .get(self.url("/people/me"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| transport("own identity", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("own identity", resp.status()));
        }
        let person: PersonResponse =
            resp.json().await.map_err(|e| bad_payload("own identity", &e))?;
        debug!(person_id = %person.id, "resolved bot identity");
        Ok(BotIdentity {
            person_id: person.id,
            display_name: person.display_name,
        })
    }

    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, BridgeError> {
        let resp = self
            .client
            .get(self.url(&format!("/messages/{message_id}")))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| transport("get message", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("get message", resp.status()));
        }
        let message: MessageResponse =
            resp.json().await.map_err(|e| bad_payload("get message", &e))?;
        Ok(ChatMessage {
            id: message.id,
            room_id: message.room_id,
            person_id: message.person_id,
            text: message.text,
        })
    }

    async fn post_message(
        &self,
        room_id: &str,
        markdown: &str,
        text: &str,
    ) -> Result<(), BridgeError> {
        debug!(room_id, "posting reply");
        let resp = self
            .client
            .post(self.url("/messages"))
            .bearer_auth(&self.token)
            .json(&json!({ "roomId": room_id, "markdown": markdown, "text": text }))
            .send()
            .await
            .map_err(|e| transport("post message", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("post message", resp.status()));
        }
        Ok(())
    }

    async fn post_direct_message(
        &self,
        person_email: &str,
        text: &str,
    ) -> Result<(), BridgeError> {
        debug!(person_email, "posting direct message");
        let resp = self
            .client
            .post(self.url("/messages"))
            .bearer_auth(&self.token)
            .json(&json!({ "toPersonEmail": person_email, "text": text }))
            .send()
            .await
            .map_err(|e| transport("post direct message", &e))?;
        if !resp.status().is_success() {
            return Err(bad_status("post direct message", resp.status()));
        }
        Ok(())
    }
}
