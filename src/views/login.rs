//! Sign-in / sign-up form state.

use super::InFlight;
use crate::backend::domain::AuthUser;
use crate::tracker::services::{AuthService, user_message};

/// Which action the form submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    /// Sign in to an existing account.
    #[default]
    SignIn,
    /// Create an account.
    SignUp,
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user is signed in.
    SignedIn(AuthUser),
    /// A submission is already running; nothing was sent.
    Busy,
    /// The provider refused; the message is also kept on the form.
    Failed(String),
}

/// Login form fields and feedback.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Submit action.
    pub mode: LoginMode,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Display name, used when signing up.
    pub display_name: String,
    error: Option<String>,
    in_flight: InFlight,
}

impl LoginForm {
    /// Creates an empty sign-in form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches between sign-in and sign-up, clearing any error.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.error = None;
    }

    /// Returns the last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the form's busy flag.
    #[must_use]
    pub const fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Signs in or signs up with the current fields.
    pub async fn submit(&mut self, auth: &AuthService) -> SubmitOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            return SubmitOutcome::Busy;
        };
        self.error = None;
        let result = match self.mode {
            LoginMode::SignIn => auth.sign_in(&self.email, &self.password).await,
            LoginMode::SignUp => {
                auth.sign_up(&self.email, &self.password, &self.display_name)
                    .await
            }
        };
        match result {
            Ok(user) => SubmitOutcome::SignedIn(user),
            Err(err) => {
                let message = user_message(&err);
                tracing::debug!(error = %message, mode = ?self.mode, "login failed");
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
