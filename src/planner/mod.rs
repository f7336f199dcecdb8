//! Weekly study plan: generation from weak subjects and reconciliation of
//! overdue entries. Both are pure over their inputs and a given date;
//! loading and storing plans is the caller's job.

pub mod board;
pub mod generator;
pub mod reconciler;

pub use board::Tab;
pub use generator::Generator;
pub use reconciler::{reconcile_in_place, reconcile_with_clock};
