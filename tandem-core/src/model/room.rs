use crate::model::peer::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, client supplied room name.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the relay to join a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room did not exist and now holds only the caller.
    Created,
    /// The caller became the second occupant.
    Joined,
    /// Two occupants already; nothing changed.
    Full,
}

impl JoinOutcome {
    /// Role the caller plays in the pairing, `None` when rejected.
    pub fn role(self) -> Option<Role> {
        match self {
            JoinOutcome::Created => Some(Role::Impolite),
            JoinOutcome::Joined => Some(Role::Polite),
            JoinOutcome::Full => None,
        }
    }
}
