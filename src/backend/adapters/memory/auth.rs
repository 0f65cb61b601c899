//! In-memory email/password auth provider.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};
use uuid::Uuid;

use crate::backend::{
    domain::AuthUser,
    ports::{AuthError, AuthListener, AuthProvider, AuthResult, Subscription},
};

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Thread-safe in-memory auth provider with a single signed-in session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthProvider {
    state: Arc<RwLock<AuthState>>,
}

#[derive(Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    current_email: Option<String>,
    listeners: HashMap<u64, AuthListener>,
    next_listener_id: u64,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("accounts", &self.accounts.len())
            .field("signed_in", &self.current_email.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password_digest: String,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, AuthState>> {
        self.state
            .write()
            .map_err(|err| AuthError::Provider(err.to_string()))
    }

    fn read_state(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, AuthState>> {
        self.state
            .read()
            .map_err(|err| AuthError::Provider(err.to_string()))
    }
}

fn digest_password(uid: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uid.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn normalize_email(email: &str) -> AuthResult<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let valid = normalized
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        && !normalized.chars().any(char::is_whitespace);
    if valid {
        Ok(normalized)
    } else {
        Err(AuthError::InvalidEmail(email.to_owned()))
    }
}

const fn check_password_strength(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

fn current_user(state: &AuthState) -> Option<AuthUser> {
    state
        .current_email
        .as_ref()
        .and_then(|email| state.accounts.get(email))
        .map(|account| account.user.clone())
}

fn listeners(state: &AuthState) -> Vec<AuthListener> {
    state.listeners.values().map(Arc::clone).collect()
}

fn notify(listeners: Vec<AuthListener>, user: &Option<AuthUser>) {
    for listener in listeners {
        listener(user.clone());
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let email_key = normalize_email(email)?;
        let (user, pending) = {
            let mut state = self.write_state()?;
            let account = state
                .accounts
                .get(&email_key)
                .ok_or(AuthError::InvalidCredentials)?;
            if account.password_digest != digest_password(account.user.uid(), password) {
                return Err(AuthError::InvalidCredentials);
            }
            let user = account.user.clone();
            state.current_email = Some(email_key);
            (user, listeners(&state))
        };
        notify(pending, &Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<AuthUser> {
        let email_key = normalize_email(email)?;
        check_password_strength(password)?;
        let (user, pending) = {
            let mut state = self.write_state()?;
            if state.accounts.contains_key(&email_key) {
                return Err(AuthError::EmailInUse(email_key));
            }
            let uid = Uuid::new_v4().simple().to_string();
            let user = AuthUser::new(uid.as_str())
                .with_email(email_key.as_str())
                .with_display_name(display_name);
            let account = Account {
                user: user.clone(),
                password_digest: digest_password(&uid, password),
            };
            state.accounts.insert(email_key.clone(), account);
            state.current_email = Some(email_key);
            (user, listeners(&state))
        };
        notify(pending, &Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let pending = {
            let mut state = self.write_state()?;
            if state.current_email.take().is_none() {
                return Ok(());
            }
            listeners(&state)
        };
        notify(pending, &None);
        Ok(())
    }

    async fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        let state = self.read_state()?;
        Ok(current_user(&state))
    }

    async fn change_password(&self, new_password: &str) -> AuthResult<()> {
        check_password_strength(new_password)?;
        let mut state = self.write_state()?;
        let email = state.current_email.clone().ok_or(AuthError::NotSignedIn)?;
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or(AuthError::NotSignedIn)?;
        account.password_digest = digest_password(account.user.uid(), new_password);
        Ok(())
    }

    async fn change_display_name(&self, display_name: &str) -> AuthResult<AuthUser> {
        let (user, pending) = {
            let mut state = self.write_state()?;
            let email = state.current_email.clone().ok_or(AuthError::NotSignedIn)?;
            let account = state
                .accounts
                .get_mut(&email)
                .ok_or(AuthError::NotSignedIn)?;
            account.user = account.user.clone().with_display_name(display_name);
            let user = account.user.clone();
            (user, listeners(&state))
        };
        notify(pending, &Some(user.clone()));
        Ok(user)
    }

    fn subscribe(&self, listener: AuthListener) -> AuthResult<Subscription> {
        let (listener_id, user) = {
            let mut state = self.write_state()?;
            state.next_listener_id += 1;
            let listener_id = state.next_listener_id;
            state.listeners.insert(listener_id, Arc::clone(&listener));
            (listener_id, current_user(&state))
        };
        listener(user);

        let weak_state: Weak<RwLock<AuthState>> = Arc::downgrade(&self.state);
        Ok(Subscription::new(move || {
            if let Some(state) = weak_state.upgrade() {
                if let Ok(mut guard) = state.write() {
                    guard.listeners.remove(&listener_id);
                }
            }
        }))
    }
}
