//! Observed authentication state.

use tokio::sync::watch;

use crate::backend::{domain::AuthUser, ports::Subscription};
use crate::tracker::{
    domain::UserId,
    services::{AuthService, SessionResult, TrackerService, display_name_or_email},
};

/// Current user plus whether the first auth event is still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// Signed-in user, if any.
    pub user: Option<AuthUser>,
    /// `true` until the provider reports the initial state.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Auth session observer.
///
/// Each observed signed-in user with an email gets a profile document,
/// created in a background task when missing.
#[derive(Debug)]
pub struct AuthView {
    receiver: watch::Receiver<AuthState>,
    _subscription: Subscription,
}

impl AuthView {
    /// Subscribes to auth-state changes.
    ///
    /// Profile creation needs a Tokio runtime; without one it is skipped
    /// and logged.
    ///
    /// # Errors
    ///
    /// Returns the provider's registration error.
    pub fn open(auth: &AuthService) -> SessionResult<Self> {
        let (sender, receiver) = watch::channel(AuthState::default());
        let tracker = auth.tracker().clone();
        let subscription = auth.subscribe_auth(move |user| {
            if let Some(signed_in) = user.as_ref() {
                ensure_profile(&tracker, signed_in);
            }
            sender.send_replace(AuthState {
                user,
                loading: false,
            });
        })?;
        Ok(Self {
            receiver,
            _subscription: subscription,
        })
    }

    /// Returns the latest auth state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.receiver.borrow().clone()
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        self.receiver.borrow().user.clone()
    }

    /// Returns `true` until the first auth event arrives.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.receiver.borrow().loading
    }

    /// Returns a receiver notified on every auth change.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<AuthState> {
        self.receiver.clone()
    }
}

fn ensure_profile(tracker: &TrackerService, user: &AuthUser) {
    let Some(email) = user.email() else {
        return;
    };
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!(uid = user.uid(), "no async runtime; user profile not ensured");
        return;
    };
    let display_name =
        display_name_or_email(user.display_name().unwrap_or_default(), email).to_owned();
    let user_id = UserId::new(user.uid());
    let owned_email = email.to_owned();
    let service = tracker.clone();
    runtime.spawn(async move {
        if let Err(err) = service
            .ensure_user_doc(&user_id, &owned_email, &display_name)
            .await
        {
            tracing::warn!(%user_id, error = %err, "ensuring user profile failed");
        }
    });
}
