//! Lantern — action dispatch.
//!
//! The dispatcher makes a stateless-per-request bridge look like a
//! persistent game session: each user turn re-discovers the session's
//! process from the game-runner, spawns and restores when none exists,
//! forwards the action, saves, and tears the process down again.

pub mod resolver;
pub mod turn;

pub use resolver::resolve;
pub use turn::{TurnConfig, TurnOutcome, take_turn};
