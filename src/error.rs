use thiserror::Error;

/// Rejected user input at the CLI/TUI boundary.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown plan type '{0}' (expected ai or manual)")]
    UnknownPlanKind(String),
    #[error("unknown tab '{0}' (expected today, tomorrow, upcoming or all)")]
    UnknownTab(String),
    #[error("unknown resource type '{0}' (expected video or article)")]
    UnknownResourceKind(String),
    #[error("'{0}' is not a valid date, use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("'{0}' is not a valid time, use HH:MM")]
    InvalidTime(String),
    #[error("no student with USN '{0}' on the roster")]
    UnknownStudent(String),
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("summary must not be empty")]
    EmptySummary,
    #[error("total {0} is out of range (0-{1})")]
    TotalOutOfRange(f64, f64),
}
