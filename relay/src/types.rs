use serde::{Deserialize, Serialize};

pub type ConnectionId = u32;

/// Stable identifier minted by the identity layer. A presenter's live
/// session is keyed by the presenter's user id.
pub type UserId = String;

/// One stroke as produced by the drawing surface. The relay forwards it
/// structurally unchanged and never looks inside.
pub type PathPayload = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}
