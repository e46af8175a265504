//! Lantern Core — shared domain types.
//!
//! This crate defines the types every other crate depends on: the error
//! taxonomy, action normalization and the blocked-command policy, session
//! labels, and the reply chunker. It contains no I/O.

pub mod action;
pub mod chunk;
pub mod error;
pub mod session;
