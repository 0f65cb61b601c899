//! Domain model for sprints, tasks and users.
//!
//! Values here are plain data with no infrastructure dependencies. A task's
//! completion flag is derived from its status rather than stored, so it can
//! never disagree with it.

mod error;
mod ids;
mod millis;
mod patch;
mod sprint;
mod status;
mod task;
mod user;

pub use error::ParseTaskStatusError;
pub use ids::{SprintId, TaskId, UserId};
pub use millis::EpochMillis;
pub use patch::FieldPatch;
pub use sprint::{CreateSprintOptions, Sprint, SprintUpdate};
pub use status::TaskStatus;
pub use task::{CreateTaskOptions, PersistedTaskData, Task, TaskUpdate};
pub use user::AppUser;
