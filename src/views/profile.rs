//! Profile editing: display name and password.

use super::InFlight;
use crate::backend::adapters::memory::MIN_PASSWORD_LENGTH;
use crate::tracker::services::{AuthService, user_message};

/// Confirmation shown after a name change.
pub const NAME_UPDATED: &str = "Name updated";
/// Confirmation shown after a password change.
pub const PASSWORD_UPDATED: &str = "Password updated";
/// Error shown for a password below the minimum length.
pub const PASSWORD_TOO_SHORT: &str = "New password must be at least 6 characters";

/// Profile form fields and feedback.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    /// Desired display name; blank falls back to the email.
    pub display_name: String,
    /// Desired password.
    pub new_password: String,
    error: Option<String>,
    success: Option<&'static str>,
    in_flight: InFlight,
}

impl ProfileForm {
    /// Creates a form prefilled with the current display name.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Returns the last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the last confirmation message.
    #[must_use]
    pub const fn success(&self) -> Option<&'static str> {
        self.success
    }

    /// Saves the display name to the auth profile and user document.
    ///
    /// Returns `false` when a save is already running or it failed.
    pub async fn update_name(&mut self, auth: &AuthService) -> bool {
        let Some(_guard) = self.in_flight.try_begin() else {
            return false;
        };
        self.clear_feedback();
        match auth.change_display_name(&self.display_name).await {
            Ok(user) => {
                self.display_name = user.display_name().unwrap_or_default().to_owned();
                self.success = Some(NAME_UPDATED);
                true
            }
            Err(err) => {
                self.error = Some(user_message(&err));
                false
            }
        }
    }

    /// Changes the password; short passwords are refused locally.
    ///
    /// Returns `false` when refused, already running, or failed.
    pub async fn change_password(&mut self, auth: &AuthService) -> bool {
        let Some(_guard) = self.in_flight.try_begin() else {
            return false;
        };
        self.clear_feedback();
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            self.error = Some(PASSWORD_TOO_SHORT.to_owned());
            return false;
        }
        match auth.change_password(&self.new_password).await {
            Ok(()) => {
                self.new_password.clear();
                self.success = Some(PASSWORD_UPDATED);
                true
            }
            Err(err) => {
                self.error = Some(user_message(&err));
                false
            }
        }
    }

    fn clear_feedback(&mut self) {
        self.error = None;
        self.success = None;
    }
}
