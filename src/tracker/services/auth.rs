//! Session operations layered over the auth provider and user profiles.

use std::sync::Arc;

use super::{TrackerError, TrackerService};
use crate::backend::{
    Backend,
    adapters::memory::MIN_PASSWORD_LENGTH,
    domain::AuthUser,
    ports::{AuthError, AuthListener, AuthProvider, Subscription},
};
use crate::tracker::domain::UserId;
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The auth provider rejected the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Updating the user profile document failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Sign-in, sign-up and profile maintenance.
#[derive(Clone)]
pub struct AuthService {
    auth: Option<Arc<dyn AuthProvider>>,
    tracker: TrackerService,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("ready", &self.is_ready())
            .field("tracker", &self.tracker)
            .finish()
    }
}

impl AuthService {
    /// Creates a service over the backend's auth provider, if connected.
    #[must_use]
    pub fn new(backend: &Backend) -> Self {
        Self {
            auth: backend.auth(),
            tracker: TrackerService::new(backend),
        }
    }

    /// Returns `true` when an auth provider is connected.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the tracker service used for profile documents.
    #[must_use]
    pub const fn tracker(&self) -> &TrackerService {
        &self.tracker
    }

    fn provider(&self) -> Result<&Arc<dyn AuthProvider>, AuthError> {
        self.auth.as_ref().ok_or(AuthError::NotConfigured)
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] when the backend is inert, or the
    /// provider's error.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<AuthUser> {
        let user = self.provider()?.sign_in(email.trim(), password).await?;
        tracing::info!(uid = user.uid(), "signed in");
        Ok(user)
    }

    /// Creates an account; a blank display name falls back to the email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] when the backend is inert, or the
    /// provider's error.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> SessionResult<AuthUser> {
        let trimmed_email = email.trim();
        let name = display_name_or_email(display_name, trimmed_email);
        let user = self
            .provider()?
            .sign_up(trimmed_email, password, name)
            .await?;
        tracing::info!(uid = user.uid(), "account created");
        Ok(user)
    }

    /// Signs out; does nothing when the backend is inert.
    ///
    /// # Errors
    ///
    /// Returns the provider's error.
    pub async fn sign_out(&self) -> SessionResult<()> {
        let Some(auth) = self.auth.as_ref() else {
            return Ok(());
        };
        auth.sign_out().await?;
        Ok(())
    }

    /// Returns the signed-in user, or `None` when signed out or inert.
    ///
    /// # Errors
    ///
    /// Returns the provider's error.
    pub async fn current_user(&self) -> SessionResult<Option<AuthUser>> {
        let Some(auth) = self.auth.as_ref() else {
            return Ok(None);
        };
        Ok(auth.current_user().await?)
    }

    /// Changes the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::WeakPassword`] for a password shorter than six
    /// characters without contacting the provider.
    pub async fn change_password(&self, new_password: &str) -> SessionResult<()> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        self.provider()?.change_password(new_password).await?;
        Ok(())
    }

    /// Changes the display name on the auth profile and the user document.
    ///
    /// A blank name falls back to the user's email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] without a session, or the
    /// underlying provider or store error.
    pub async fn change_display_name(&self, display_name: &str) -> SessionResult<AuthUser> {
        let auth = self.provider()?;
        let current = auth.current_user().await?.ok_or(AuthError::NotSignedIn)?;
        let name = display_name_or_email(display_name, current.email().unwrap_or_default());
        let updated = auth.change_display_name(name).await?;
        self.tracker
            .update_user_profile(&UserId::new(updated.uid()), name)
            .await?;
        Ok(updated)
    }

    /// Registers an auth-state listener.
    ///
    /// When inert, the listener receives `None` once and an inert
    /// subscription is returned.
    ///
    /// # Errors
    ///
    /// Returns the provider's registration error.
    pub fn subscribe_auth(
        &self,
        listener: impl Fn(Option<AuthUser>) + Send + Sync + 'static,
    ) -> SessionResult<Subscription> {
        let Some(auth) = self.auth.as_ref() else {
            listener(None);
            return Ok(Subscription::inert());
        };
        let shared: AuthListener = Arc::new(listener);
        Ok(auth.subscribe(shared)?)
    }
}

/// Returns the trimmed display name, or the email when it is blank.
#[must_use]
pub fn display_name_or_email<'a>(display_name: &'a str, email: &'a str) -> &'a str {
    let trimmed = display_name.trim();
    if trimmed.is_empty() { email } else { trimmed }
}

/// Message to show for a failed user action: the error's own message, or
/// the generic fallback when it has none.
#[must_use]
pub fn user_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_owned()
    } else {
        message
    }
}

/// Fallback text for errors without a message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
