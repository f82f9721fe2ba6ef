use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The user on whose behalf edits are committed.
///
/// Sourced from the session's authentication context; only data, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActingUser {
    pub username: String,
    /// Subdepartment code, denormalised onto audit records.
    pub subdepartment: Option<String>,
}
