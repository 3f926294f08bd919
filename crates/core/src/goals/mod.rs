//! Goals module - fixed capital milestones and progress toward them.

mod goals_model;
mod goals_progress;

pub use goals_model::{Goal, TargetProgress};
pub use goals_progress::{goal_progress, parse_targets, progress_fraction};
