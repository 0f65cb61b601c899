//! Application user profile.

use super::{EpochMillis, UserId};
use serde::{Deserialize, Serialize};

/// User profile document, keyed by auth uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    /// Auth provider uid.
    pub id: UserId,
    /// Sign-in email.
    pub email: String,
    /// Name shown on cards and in the assignee picker.
    pub display_name: String,
    /// Profile creation time.
    pub created_at: EpochMillis,
}

impl AppUser {
    /// Name to show for the user: display name, else email.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}
