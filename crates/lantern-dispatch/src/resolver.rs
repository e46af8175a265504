//! Game session resolver.
//!
//! The session→process mapping is never cached locally: the dispatcher
//! process is stateless between requests, so every turn re-discovers the
//! mapping from the game-runner's authoritative listing.

use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;
use lantern_zmachine::GameRunner;
use tracing::debug;

/// Looks up a live process for `label` in the game-runner's listing.
///
/// Returns `Ok(None)` when no entry matches or the matching entry carries
/// no pid — both mean "start fresh". An O(n) scan; process count is bounded
/// by concurrent active conversations.
///
/// # Errors
///
/// A transport failure while listing is a hard error, never an empty
/// listing: treating a listing outage as "no game" would spawn duplicate
/// processes.
pub async fn resolve(
    runner: &dyn GameRunner,
    label: &SessionLabel,
) -> Result<Option<String>, BridgeError> {
    let games = runner.list_games().await?;
    let pid = games
        .into_iter()
        .find(|g| g.label == label.as_str())
        .and_then(|g| g.pid);

    match &pid {
        Some(pid) => debug!(label = %label, pid, "session has a live process"),
        None => debug!(label = %label, "no live process for session"),
    }
    Ok(pid)
}
