//! Game-runner abstraction.

use async_trait::async_trait;
use lantern_core::action::Action;
use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;

/// One entry in the game-runner's process listing.
///
/// The runner occasionally reports entries without a pid (a process that
/// died but has not been reaped); such entries are treated as "no game", not
/// as errors.
#[derive(Debug, Clone)]
pub struct GameListing {
    /// Opaque process handle, when the process is actually live.
    pub pid: Option<String>,
    /// Session label the process was spawned under.
    pub label: String,
}

/// Result of spawning a process for a session.
#[derive(Debug, Clone)]
pub struct SpawnedGame {
    /// Opaque handle to the interpreter process.
    pub pid: String,
    /// Introductory or continuation text emitted on spawn. This is the
    /// provisional reply: it becomes the final answer when no prior save
    /// exists.
    pub reply: String,
}

/// Result of a tolerant restore request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A prior save existed and is now loaded — continuing session.
    Restored,
    /// No usable save — brand-new session, the provisional reply stands.
    NoSavedGame,
}

/// HTTP surface of the external game-runner.
///
/// Every method maps to one round trip. Transport failures are surfaced as
/// [`BridgeError::Transport`]; only `restore_game` tolerates a non-success
/// status, because "no save yet" arrives as one.
#[async_trait]
pub trait GameRunner: Send + Sync {
    /// Lists all running interpreter processes.
    async fn list_games(&self) -> Result<Vec<GameListing>, BridgeError>;

    /// Spawns an interpreter for `game` under `label`, or returns the
    /// process already registered under that label.
    async fn spawn_game(&self, game: &str, label: &SessionLabel)
    -> Result<SpawnedGame, BridgeError>;

    /// Attempts to restore the session's save slot into process `pid`.
    async fn restore_game(&self, pid: &str) -> Result<RestoreOutcome, BridgeError>;

    /// Forwards one user command to process `pid`, returning the
    /// interpreter's text output for the turn.
    async fn send_action(&self, pid: &str, action: &Action) -> Result<String, BridgeError>;

    /// Persists process `pid`'s state to the session's save slot.
    async fn save_game(&self, pid: &str) -> Result<(), BridgeError>;

    /// Destroys process `pid`.
    async fn delete_game(&self, pid: &str) -> Result<(), BridgeError>;
}
