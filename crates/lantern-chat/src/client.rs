//! Chat platform abstraction.

use async_trait::async_trait;
use lantern_core::error::BridgeError;

/// The bot's own account, fetched once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    /// Person id the platform stamps on messages the bot authors.
    pub person_id: String,
    /// Display name, as it appears in mention text.
    pub display_name: String,
}

/// One message fetched from the chat API.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Message id.
    pub id: String,
    /// Room the message was posted in.
    pub room_id: String,
    /// Author's person id.
    pub person_id: String,
    /// Plain-text body, possibly carrying mention markup.
    pub text: String,
}

/// HTTP surface of the chat platform.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Resolves the bot's own identity (`GET /people/me`).
    async fn own_identity(&self) -> Result<BotIdentity, BridgeError>;

    /// Fetches a message body by id. Webhooks only announce ids.
    async fn get_message(&self, message_id: &str) -> Result<ChatMessage, BridgeError>;

    /// Posts a reply to `room_id`, as markdown with a plain-text fallback.
    async fn post_message(
        &self,
        room_id: &str,
        markdown: &str,
        text: &str,
    ) -> Result<(), BridgeError>;

    /// Sends a direct message to a person by email. Used for out-of-band
    /// error escalation to the admin contact.
    async fn post_direct_message(&self, person_email: &str, text: &str)
    -> Result<(), BridgeError>;
}
