//! The per-turn reconciliation state machine.
//!
//! The game-runner does not keep idle sessions resident, so every user turn
//! is one unit of work: spawn (or adopt) a process, restore the session's
//! save, run the action, save again, tear the process down. Encoding
//! "continue vs. start" as "attempt restore, branch on status" collapses a
//! separate existence check into the natural create+restore sequence.

use std::sync::Arc;

use lantern_core::action::{APOLOGY_REPLY, Action, BlockedCommands, REFUSAL_REPLY};
use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;
use lantern_zmachine::{GameRunner, RestoreOutcome};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::resolver::resolve;

/// Per-deployment dispatch configuration.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// Game title spawned for new sessions.
    pub game: String,
    /// Session-management commands refused instead of forwarded.
    pub blocked: BlockedCommands,
}

impl TurnConfig {
    /// Configuration for `game` with the default blocked-command policy.
    #[must_use]
    pub fn new(game: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            blocked: BlockedCommands::default(),
        }
    }
}

/// Result of one turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Text to relay to the user. On any transport failure this is a fixed
    /// apology; internal detail goes to the log only.
    pub reply: String,
    /// Handle of the fire-and-forget teardown task, when one was spawned.
    /// The reply never waits on it; tests may.
    pub teardown: Option<JoinHandle<()>>,
}

/// States of the turn pipeline. Each state performs at most one round trip
/// to the game-runner; any transport failure moves to `Failed`.
#[derive(Debug)]
enum TurnState {
    /// Re-discover a live process for the session from the runner's listing.
    Resolving,
    /// No live process: request creation (spawn, or the runner's existing
    /// registration under this label).
    Spawning,
    /// Attempt to load the session's save into the spawned process. The
    /// spawn text rides along as the provisional reply.
    Restoring { pid: String, provisional: String },
    /// Continuing session, but the action is a session-management command:
    /// refuse it without touching the interpreter.
    Blocked { pid: String },
    /// Continuing session: forward the action to the interpreter.
    Acting { pid: String },
    /// Persist interpreter state back to the session's save slot.
    Saving { pid: String, reply: String },
    /// Schedule best-effort deletion of the process.
    TearingDown { pid: String, reply: String },
    /// Terminal: `reply` goes back to the user.
    Done { reply: String },
    /// Terminal: a step failed; the user gets the fixed apology.
    Failed,
}

/// Runs one complete turn for `label`.
///
/// No state survives this call: the next message for the same session
/// triggers the full resolve/spawn/restore cycle again.
pub async fn take_turn(
    runner: &Arc<dyn GameRunner>,
    label: &SessionLabel,
    action: &Action,
    config: &TurnConfig,
) -> TurnOutcome {
    let mut state = TurnState::Resolving;
    let mut teardown = None;

    loop {
        state = match state {
            TurnState::Resolving => match resolve(runner.as_ref(), label).await {
                Ok(Some(pid)) => {
                    // A live process means a previous turn never reached
                    // teardown (or a concurrent turn is in flight). Its
                    // state is current, so skip spawn/restore.
                    continuing(pid, action, &config.blocked)
                }
                Ok(None) => TurnState::Spawning,
                Err(err) => fail("resolving", &err),
            },

            TurnState::Spawning => match runner.spawn_game(&config.game, label).await {
                Ok(spawned) => TurnState::Restoring {
                    pid: spawned.pid,
                    provisional: spawned.reply,
                },
                Err(err) => fail("spawning", &err),
            },

            TurnState::Restoring { pid, provisional } => {
                match runner.restore_game(&pid).await {
                    Ok(RestoreOutcome::Restored) => continuing(pid, action, &config.blocked),
                    Ok(RestoreOutcome::NoSavedGame) => {
                        // Brand-new session: creation already persisted all
                        // there is, so the provisional reply is final.
                        info!(label = %label, "new session started");
                        TurnState::Done { reply: provisional }
                    }
                    Err(err) => fail("restoring", &err),
                }
            }

            TurnState::Blocked { pid } => TurnState::Saving {
                pid,
                reply: REFUSAL_REPLY.to_owned(),
            },

            TurnState::Acting { pid } => match runner.send_action(&pid, action).await {
                Ok(reply) => TurnState::Saving { pid, reply },
                Err(err) => fail("acting", &err),
            },

            TurnState::Saving { pid, reply } => match runner.save_game(&pid).await {
                Ok(()) => TurnState::TearingDown { pid, reply },
                Err(err) => fail("saving", &err),
            },

            TurnState::TearingDown { pid, reply } => {
                teardown = Some(spawn_teardown(Arc::clone(runner), pid));
                TurnState::Done { reply }
            }

            TurnState::Done { reply } => return TurnOutcome { reply, teardown },

            TurnState::Failed => {
                return TurnOutcome {
                    reply: APOLOGY_REPLY.to_owned(),
                    teardown,
                };
            }
        };
    }
}

/// Picks the branch for a session with live interpreter state.
fn continuing(pid: String, action: &Action, blocked: &BlockedCommands) -> TurnState {
    if blocked.contains(action) {
        // The process still has to be saved and torn down, otherwise the
        // refusal would leak it.
        TurnState::Blocked { pid }
    } else {
        TurnState::Acting { pid }
    }
}

fn fail(step: &str, err: &BridgeError) -> TurnState {
    warn!(step, error = %err, "turn failed");
    TurnState::Failed
}

/// Deletes `pid` without blocking the reply path. A crashed runner leaking
/// one process beats the user losing their reply to a teardown failure; the
/// next turn's resolver adopts any leftover process anyway.
fn spawn_teardown(runner: Arc<dyn GameRunner>, pid: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = runner.delete_game(&pid).await {
            warn!(pid, error = %err, "teardown failed; process may linger");
        }
    })
}
