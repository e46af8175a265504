//! Route modules organized by channel.

pub mod chat;
pub mod health;
pub mod voice;
