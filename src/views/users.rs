//! User directory for assignee pickers and avatars.

use super::LiveCollection;
use crate::tracker::{
    domain::{AppUser, UserId},
    services::{TrackerResult, TrackerService},
};

/// Live list of user profiles, oldest first.
#[derive(Debug)]
pub struct UsersView {
    users: LiveCollection<AppUser>,
}

impl UsersView {
    /// Subscribes to all user profiles.
    ///
    /// # Errors
    ///
    /// Returns the store error when the subscription cannot be registered.
    pub fn open(tracker: &TrackerService) -> TrackerResult<Self> {
        let users = LiveCollection::open(|publisher| {
            tracker.subscribe_users(move |snapshot| publisher.publish(snapshot))
        })?;
        Ok(Self { users })
    }

    /// Returns the latest profiles.
    #[must_use]
    pub fn users(&self) -> Vec<AppUser> {
        self.users.current()
    }

    /// Looks up a profile by id.
    #[must_use]
    pub fn find(&self, user_id: &UserId) -> Option<AppUser> {
        self.users
            .current()
            .into_iter()
            .find(|user| &user.id == user_id)
    }

    /// Returns the underlying live collection.
    #[must_use]
    pub const fn collection(&self) -> &LiveCollection<AppUser> {
        &self.users
    }
}
