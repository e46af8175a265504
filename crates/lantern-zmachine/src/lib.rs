//! Lantern — game-runner client.
//!
//! The game-runner is an external HTTP service that spawns and manages
//! z-machine interpreter processes. This crate defines the [`GameRunner`]
//! trait the reconciliation logic is written against, and the production
//! `reqwest` implementation.

pub mod client;
pub mod http;

pub use client::{GameListing, GameRunner, RestoreOutcome, SpawnedGame};
pub use http::HttpGameRunner;
