use serde::{Deserialize, Serialize};

use crate::models::SubjectRecord;

/// A student on a faculty member's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub usn: String,
    pub name: String,
    #[serde(default)]
    pub semester: u8,
}

impl Student {
    /// First two words of the name, the way roster tables show it.
    pub fn short_name(&self) -> String {
        self.name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
    }
}

/// One roster student together with their per-subject marks.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentMarks {
    pub student: Student,
    pub records: Vec<SubjectRecord>,
}

impl StudentMarks {
    pub fn record_for(&self, subject: &str) -> Option<&SubjectRecord> {
        self.records
            .iter()
            .find(|r| r.subject.eq_ignore_ascii_case(subject))
    }
}
