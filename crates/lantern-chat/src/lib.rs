//! Lantern — team-chat platform client.
//!
//! The chat platform is treated as an opaque HTTP API: webhooks announce
//! that a message or membership exists, the message body itself is fetched
//! by id, and replies are posted back to the room. This crate defines the
//! [`ChatApi`] seam, the production `reqwest` client, and the text
//! clean-up/formatting helpers the chat adapter needs.

pub mod client;
pub mod http;
pub mod markup;

pub use client::{BotIdentity, ChatApi, ChatMessage};
pub use http::HttpChatApi;
