//! Shared application state.

use std::sync::Arc;

use lantern_chat::{BotIdentity, ChatApi};
use lantern_dispatch::TurnConfig;
use lantern_zmachine::GameRunner;

/// Application state shared across all request handlers.
///
/// The only mutable-looking piece is `identity`, and it is not mutable: it
/// is resolved once at startup and `None` thereafter means "could not be
/// determined" — handlers proceed cautiously instead of blocking.
#[derive(Clone)]
pub struct AppState {
    /// Game-runner client.
    pub runner: Arc<dyn GameRunner>,
    /// Chat platform client.
    pub chat: Arc<dyn ChatApi>,
    /// The bot's own chat identity, when startup managed to resolve it.
    pub identity: Option<BotIdentity>,
    /// Dispatch configuration (game title, blocked commands).
    pub turn: TurnConfig,
    /// Email to escalate failures to, out-of-band.
    pub admin_contact: Option<String>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        runner: Arc<dyn GameRunner>,
        chat: Arc<dyn ChatApi>,
        identity: Option<BotIdentity>,
        turn: TurnConfig,
        admin_contact: Option<String>,
    ) -> Self {
        Self {
            runner,
            chat,
            identity,
            turn,
            admin_contact,
        }
    }
}
