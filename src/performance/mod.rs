pub mod analysis;
pub mod cohort;

pub use analysis::{
    score_percent, weak_subjects, PerformanceReport, Strength, MAX_INTERNAL_MARKS, WEAK_THRESHOLD,
};
pub use cohort::{ProctorReport, SubjectCohort};
