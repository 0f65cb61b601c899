//! Authentication provider port: email/password accounts.

use super::Subscription;
use crate::backend::domain::AuthUser;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for auth provider operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Callback receiving the current user whenever the auth state changes.
pub type AuthListener = Arc<dyn Fn(Option<AuthUser>) + Send + Sync>;

/// Email/password authentication contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with existing credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email or password
    /// does not match an account.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    /// Creates an account, signs it in and sets its display name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailInUse`], [`AuthError::InvalidEmail`] or
    /// [`AuthError::WeakPassword`] when the account cannot be created.
    async fn sign_up(&self, email: &str, password: &str, display_name: &str)
    -> AuthResult<AuthUser>;

    /// Signs the current user out. Signing out while signed out succeeds.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Returns the signed-in user, if any.
    async fn current_user(&self) -> AuthResult<Option<AuthUser>>;

    /// Changes the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] without a session and
    /// [`AuthError::WeakPassword`] for a short password.
    async fn change_password(&self, new_password: &str) -> AuthResult<()>;

    /// Changes the signed-in user's display name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] without a session.
    async fn change_display_name(&self, display_name: &str) -> AuthResult<AuthUser>;

    /// Registers an auth-state listener.
    ///
    /// The listener is called immediately with the current user and again
    /// after every sign-in, sign-up, sign-out and profile change.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the registration fails.
    fn subscribe(&self, listener: AuthListener) -> AuthResult<Subscription>;
}

/// Errors returned by auth providers.
///
/// Messages are written to be shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No auth backend is configured.
    #[error("authentication is not configured")]
    NotConfigured,

    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Email or password did not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("an account already exists for {0}")]
    EmailInUse(String),

    /// The password is shorter than the provider minimum.
    #[error("password must be at least {min_length} characters")]
    WeakPassword {
        /// Minimum accepted length in characters.
        min_length: usize,
    },

    /// The operation requires a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// Provider-side failure.
    #[error("auth provider error: {0}")]
    Provider(String),
}
