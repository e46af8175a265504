//! Shared test fakes for the Lantern bridge.

mod chat;
mod runner;

pub use chat::{PostedMessage, ScriptedChatApi};
pub use runner::{FailPoint, RunnerCall, ScriptedGameRunner};
