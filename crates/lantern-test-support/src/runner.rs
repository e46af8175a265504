//! Scripted `GameRunner` fake — records every call and answers from a
//! pre-configured script.

use std::sync::Mutex;

use async_trait::async_trait;
use lantern_core::action::Action;
use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;
use lantern_zmachine::{GameListing, GameRunner, RestoreOutcome, SpawnedGame};

/// One recorded call against the fake runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCall {
    /// `list_games`.
    List,
    /// `spawn_game` with the requested game and label.
    Spawn { game: String, label: String },
    /// `restore_game` on a pid.
    Restore { pid: String },
    /// `send_action` on a pid.
    Action { pid: String, action: String },
    /// `save_game` on a pid.
    Save { pid: String },
    /// `delete_game` on a pid.
    Delete { pid: String },
}

/// Step at which the fake is scripted to fail with a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// Fail the listing call.
    List,
    /// Fail the spawn call.
    Spawn,
    /// Fail the restore call.
    Restore,
    /// Fail the action call.
    Action,
    /// Fail the save call.
    Save,
    /// Fail the delete call.
    Delete,
}

/// A `GameRunner` that answers from a fixed script and records every call.
#[derive(Debug)]
pub struct ScriptedGameRunner {
    listing: Vec<GameListing>,
    spawn_pid: String,
    spawn_reply: String,
    restore: RestoreOutcome,
    action_reply: String,
    fail_at: Option<FailPoint>,
    calls: Mutex<Vec<RunnerCall>>,
}

impl ScriptedGameRunner {
    /// A runner with no process for any session and no prior save: spawn
    /// yields `pid` and the introductory text `intro`, restore reports no
    /// saved game.
    #[must_use]
    pub fn fresh_session(pid: &str, intro: &str) -> Self {
        Self {
            listing: Vec::new(),
            spawn_pid: pid.to_owned(),
            spawn_reply: intro.to_owned(),
            restore: RestoreOutcome::NoSavedGame,
            action_reply: String::new(),
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner with a restorable save: spawn yields `pid`, restore
    /// succeeds, and every action answers `action_reply`.
    #[must_use]
    pub fn continuing_session(pid: &str, action_reply: &str) -> Self {
        Self {
            listing: Vec::new(),
            spawn_pid: pid.to_owned(),
            spawn_reply: "You wake where you left off.".to_owned(),
            restore: RestoreOutcome::Restored,
            action_reply: action_reply.to_owned(),
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Adds a live process to the listing, as left behind by a turn that
    /// never reached teardown.
    #[must_use]
    pub fn with_live_process(mut self, pid: &str, label: &str) -> Self {
        self.listing.push(GameListing {
            pid: Some(pid.to_owned()),
            label: label.to_owned(),
        });
        self
    }

    /// Adds a listing entry with no pid (a dead, unreaped process).
    #[must_use]
    pub fn with_dead_process(mut self, label: &str) -> Self {
        self.listing.push(GameListing {
            pid: None,
            label: label.to_owned(),
        });
        self
    }

    /// Scripts a transport failure at the given step.
    #[must_use]
    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail_at = Some(point);
        self
    }

    /// Snapshot of every call made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RunnerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RunnerCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn maybe_fail(&self, point: FailPoint) -> Result<(), BridgeError> {
        if self.fail_at == Some(point) {
            return Err(BridgeError::Transport("scripted failure".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl GameRunner for ScriptedGameRunner {
    async fn list_games(&self) -> Result<Vec<GameListing>, BridgeError> {
        self.record(RunnerCall::List);
        self.maybe_fail(FailPoint::List)?;
        Ok(self.listing.clone())
    }

    async fn spawn_game(
        &self,
        game: &str,
        label: &SessionLabel,
    ) -> Result<SpawnedGame, BridgeError> {
        self.record(RunnerCall::Spawn {
            game: game.to_owned(),
            label: label.as_str().to_owned(),
        });
        self.maybe_fail(FailPoint::Spawn)?;
        Ok(SpawnedGame {
            pid: self.spawn_pid.clone(),
            reply: self.spawn_reply.clone(),
        })
    }

    async fn restore_game(&self, pid: &str) -> Result<RestoreOutcome, BridgeError> {
        self.record(RunnerCall::Restore { pid: pid.to_owned() });
        self.maybe_fail(FailPoint::Restore)?;
        Ok(self.restore)
    }

    async fn send_action(&self, pid: &str, action: &Action) -> Result<String, BridgeError> {
        self.record(RunnerCall::Action {
            pid: pid.to_owned(),
            action: action.as_str().to_owned(),
        });
        self.maybe_fail(FailPoint::Action)?;
        Ok(self.action_reply.clone())
    }

    async fn save_game(&self, pid: &str) -> Result<(), BridgeError> {
        self.record(RunnerCall::Save { pid: pid.to_owned() });
        self.maybe_fail(FailPoint::Save)?;
        Ok(())
    }

    async fn delete_game(&self, pid: &str) -> Result<(), BridgeError> {
        self.record(RunnerCall::Delete { pid: pid.to_owned() });
        self.maybe_fail(FailPoint::Delete)?;
        Ok(())
    }
}
