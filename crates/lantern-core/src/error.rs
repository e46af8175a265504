//! Bridge error types.

use thiserror::Error;

/// Top-level error type for the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A network or HTTP failure talking to the game-runner or chat API.
    /// Never retried; converted to a fixed apology at the pipeline boundary.
    #[error("transport error: {0}")]
    Transport(String),

    /// A remote service answered, but with a payload the bridge cannot use.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
