//! Acting-user identity used when no authentication context is available.

use hito_core::identity::ActingUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub subdepartment: String,
}

impl IdentityConfig {
    /// Returns `true` if a username is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.username.trim().is_empty()
    }

    /// Convert into the identity stamped on audit records.
    #[must_use]
    pub fn to_acting_user(&self) -> ActingUser {
        let subdepartment = self.subdepartment.trim();
        ActingUser {
            username: self.username.trim().to_string(),
            subdepartment: (!subdepartment.is_empty()).then(|| subdepartment.to_string()),
        }
    }
}
