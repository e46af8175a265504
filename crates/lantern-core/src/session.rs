//! Session labels.
//!
//! A session identifies one conversational participant-group. The label is
//! the key the game-runner tags processes and save slots with, so it has to
//! be filesystem-safe: caller ids already are, chat room ids are not and get
//! hashed.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the hashed room id.
const ROOM_LABEL_LEN: usize = 16;

/// Channel-specific key for one conversational participant-group.
///
/// The label is the only session state this system holds; the mapping from
/// label to game process is re-discovered from the game-runner on every
/// turn, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLabel(String);

impl SessionLabel {
    /// Label for a voice/SMS caller. The E.164 id is used verbatim.
    #[must_use]
    pub fn from_caller_id(caller_id: &str) -> Self {
        Self(caller_id.trim().to_owned())
    }

    /// Label for a team-chat room. Room ids contain characters the
    /// game-runner cannot use in a save-file name, so the id is hashed.
    #[must_use]
    pub fn from_room_id(room_id: &str) -> Self {
        let digest = Sha256::digest(room_id.as_bytes());
        let mut hex = String::with_capacity(ROOM_LABEL_LEN);
        for byte in digest.iter().take(ROOM_LABEL_LEN / 2) {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    /// The label text sent to the game-runner.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_id_is_used_verbatim() {
        let label = SessionLabel::from_caller_id(" +15551234567 ");
        assert_eq!(label.as_str(), "+15551234567");
    }

    #[test]
    fn test_room_id_is_hashed_to_fixed_length_hex() {
        let label = SessionLabel::from_room_id("Y2lzY29zcGFyazovL3VzL1JPT00vabc123==");
        assert_eq!(label.as_str().len(), ROOM_LABEL_LEN);
        assert!(label.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_room_hash_is_stable_and_distinct() {
        let a = SessionLabel::from_room_id("room-a");
        let a2 = SessionLabel::from_room_id("room-a");
        let b = SessionLabel::from_room_id("room-b");
        assert_eq!(a, a2);
        assert_ne!(a, b);
    }
}
