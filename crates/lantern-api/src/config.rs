//! Environment-variable configuration.

use lantern_core::error::BridgeError;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Base URL of the game-runner.
    pub zmachine_url: String,
    /// Base URL of the chat platform API.
    pub chat_api_url: String,
    /// Bearer token for the chat platform API.
    pub chat_token: String,
    /// Game title spawned for new sessions.
    pub default_game: String,
    /// Email to escalate failures to.
    pub admin_contact: Option<String>,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` when a required variable is missing or
    /// `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, BridgeError> {
        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_port(optional("PORT").as_deref())?,
            zmachine_url: required("ZMACHINE_URL")?,
            chat_api_url: required("CHAT_API_URL")?,
            chat_token: required("CHAT_TOKEN")?,
            default_game: optional("DEFAULT_GAME").unwrap_or_else(|| "zork".to_owned()),
            admin_contact: optional("ADMIN_CONTACT"),
        })
    }
}

fn required(name: &str) -> Result<String, BridgeError> {
    std::env::var(name).map_err(|_| BridgeError::Config(format!("{name} must be set")))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_port(value: Option<&str>) -> Result<u16, BridgeError> {
    match value {
        None => Ok(5432),
        Some(raw) => raw
            .parse()
            .map_err(|e| BridgeError::Config(format!("PORT must be a valid u16: {e}"))),
    }
}
