//! Action normalization and the blocked-command policy.
//!
//! Every inbound message becomes an [`Action`] before the dispatcher sees
//! it. Session-management commands (`quit`, `save`, ...) are meaningless in
//! the restart-per-turn model and would corrupt or destroy the restored
//! state the dispatcher is about to save, so they are intercepted with a
//! fixed refusal instead of being forwarded to the interpreter.

/// Reply returned when a session-management command is intercepted.
pub const REFUSAL_REPLY: &str =
    "I handle saving and quitting for you - your game is saved after every move. \
     Just keep playing!";

/// Reply returned when any step of the turn pipeline fails.
pub const APOLOGY_REPLY: &str =
    "Something went wrong talking to the game. Please try that again in a moment.";

/// One user-submitted interpreter command, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action(String);

impl Action {
    /// Normalizes raw channel input into an action.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// The normalized command text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the user sent nothing but whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The set of session-management commands the dispatcher refuses to forward.
///
/// The exact membership is a product decision, so the set is carried as a
/// value rather than hard-coded at the interception site.
#[derive(Debug, Clone)]
pub struct BlockedCommands {
    commands: Vec<String>,
}

impl BlockedCommands {
    /// Builds a policy from an explicit command list. Entries are normalized
    /// the same way actions are.
    #[must_use]
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            commands: commands
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// True when `action` matches a blocked command.
    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        self.commands.iter().any(|c| c == action.as_str())
    }
}

impl Default for BlockedCommands {
    fn default() -> Self {
        Self::new(["quit", "save", "restore", "restart", "script", "unscript", "/game"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_lowercases() {
        let action = Action::parse("  Open Mailbox \n");
        assert_eq!(action.as_str(), "open mailbox");
    }

    #[test]
    fn test_parse_whitespace_only_is_empty() {
        assert!(Action::parse("   \t").is_empty());
        assert!(!Action::parse("look").is_empty());
    }

    #[test]
    fn test_default_policy_blocks_session_commands() {
        let policy = BlockedCommands::default();
        for raw in ["quit", "QUIT", " Save ", "restore", "Restart", "script", "unscript", "/game"] {
            assert!(policy.contains(&Action::parse(raw)), "{raw} should be blocked");
        }
    }

    #[test]
    fn test_default_policy_allows_game_commands() {
        let policy = BlockedCommands::default();
        for raw in ["look", "inventory", "go north", "q", "save the princess"] {
            assert!(!policy.contains(&Action::parse(raw)), "{raw} should pass through");
        }
    }

    #[test]
    fn test_custom_policy_membership() {
        let policy = BlockedCommands::new(["quit", "q"]);
        assert!(policy.contains(&Action::parse("q")));
        assert!(!policy.contains(&Action::parse("restart")));
    }
}
