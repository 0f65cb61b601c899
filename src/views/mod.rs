//! View state for the board front end.
//!
//! Each view owns its live subscriptions and exposes the mutations its
//! screen needs. Dropping a view unregisters its subscriptions.

mod auth;
mod import_panel;
mod in_flight;
mod live;
mod login;
mod profile;
mod sprints;
mod tasks;
mod users;

pub use auth::{AuthState, AuthView};
pub use import_panel::{ImportOutcome, ImportPanel, SAMPLE_CSV};
pub use in_flight::{InFlight, InFlightGuard};
pub use live::{LiveCollection, SnapshotPublisher};
pub use login::{LoginForm, LoginMode, SubmitOutcome};
pub use profile::{NAME_UPDATED, PASSWORD_TOO_SHORT, PASSWORD_UPDATED, ProfileForm};
pub use sprints::SprintsView;
pub use tasks::TasksView;
pub use users::UsersView;

#[cfg(test)]
mod tests;
