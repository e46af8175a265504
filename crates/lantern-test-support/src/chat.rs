//! Scripted `ChatApi` fake.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lantern_chat::{BotIdentity, ChatApi, ChatMessage};
use lantern_core::error::BridgeError;

/// A `ChatApi` that serves pre-registered messages and records every
/// posted reply. With no identity configured, `own_identity` fails the way
/// an unreachable chat API would.
#[derive(Debug, Default)]
pub struct ScriptedChatApi {
    identity: Option<BotIdentity>,
    messages: Mutex<HashMap<String, ChatMessage>>,
    posted: Mutex<Vec<PostedMessage>>,
    direct: Mutex<Vec<(String, String)>>,
}

/// One reply recorded by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Target room.
    pub room_id: String,
    /// Markdown body.
    pub markdown: String,
    /// Plain-text body.
    pub text: String,
}

impl ScriptedChatApi {
    /// A chat API whose `own_identity` answers `identity`.
    #[must_use]
    pub fn with_identity(identity: BotIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    /// Registers a message that `get_message` will serve by id.
    pub fn add_message(&self, message: ChatMessage) {
        self.messages
            .lock()
            .unwrap()
            .insert(message.id.clone(), message);
    }

    /// Snapshot of every reply posted so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn posted(&self) -> Vec<PostedMessage> {
        self.posted.lock().unwrap().clone()
    }

    /// Snapshot of every `(person_email, text)` direct message sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn direct_messages(&self) -> Vec<(String, String)> {
        self.direct.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for ScriptedChatApi {
    async fn own_identity(&self) -> Result<BotIdentity, BridgeError> {
        self.identity
            .clone()
            .ok_or_else(|| BridgeError::Transport("chat API unreachable".to_owned()))
    }

    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, BridgeError> {
        self.messages
            .lock()
            .unwrap()
            .get(message_id)
            .cloned()
            .ok_or_else(|| BridgeError::Protocol(format!("no such message: {message_id}")))
    }

    async fn post_message(
        &self,
        room_id: &str,
        markdown: &str,
        text: &str,
    ) -> Result<(), BridgeError> {
        self.posted.lock().unwrap().push(PostedMessage {
            room_id: room_id.to_owned(),
            markdown: markdown.to_owned(),
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn post_direct_message(
        &self,
        person_email: &str,
        text: &str,
    ) -> Result<(), BridgeError> {
        self.direct
            .lock()
            .unwrap()
            .push((person_email.to_owned(), text.to_owned()));
        Ok(())
    }
}
