//! Application services for the tracker context.

mod auth;
mod data_access;

pub use auth::{
    AuthService, GENERIC_ERROR_MESSAGE, SessionError, SessionResult, display_name_or_email,
    user_message,
};
pub use data_access::{TrackerError, TrackerResult, TrackerService};
