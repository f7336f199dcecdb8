use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InputError;

/// Where a plan entry came from. Only affects display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Ai,
    Manual,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Ai => "ai",
            PlanKind::Manual => "manual",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PlanKind::Ai => "✦",
            PlanKind::Manual => "✎",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ai" => Ok(PlanKind::Ai),
            "manual" => Ok(PlanKind::Manual),
            _ => Err(InputError::UnknownPlanKind(s.to_string())),
        }
    }
}

/// One scheduled study session.
///
/// Dates and times are kept as the ISO strings they were entered with;
/// ordering relies on `YYYY-MM-DD` and `HH:MM` sorting lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub id: String,
    pub date: String,
    pub subject: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "type")]
    pub kind: PlanKind,
    #[serde(default)]
    pub is_overdue: bool,
}

impl PlanEntry {
    /// Key used for same-day ordering; entries without a time sort first.
    pub fn sort_time(&self) -> &str {
        self.time.as_deref().unwrap_or("00:00")
    }
}

/// User input for a manually added plan entry.
#[derive(Debug, Clone, Default)]
pub struct NewPlan {
    pub subject: String,
    pub date: String,
    pub time: Option<String>,
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_original_field_names() {
        let entry = PlanEntry {
            id: "ai-2024-03-18-Math".into(),
            date: "2024-03-18".into(),
            subject: "Math".into(),
            duration: "1 hour".into(),
            time: Some("19:00".into()),
            completed: false,
            kind: PlanKind::Ai,
            is_overdue: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "ai");
        assert_eq!(json["isOverdue"], true);
        assert_eq!(json["time"], "19:00");
    }

    #[test]
    fn missing_overdue_flag_defaults_to_false() {
        let json = r#"{"id":"1","date":"2024-03-10","subject":"DBMS","duration":"1 hour","type":"manual"}"#;
        let entry: PlanEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_overdue);
        assert!(!entry.completed);
        assert_eq!(entry.time, None);
        assert_eq!(entry.sort_time(), "00:00");
    }

    #[test]
    fn plan_kind_parses_case_insensitively() {
        assert_eq!("AI".parse::<PlanKind>().unwrap(), PlanKind::Ai);
        assert_eq!("manual".parse::<PlanKind>().unwrap(), PlanKind::Manual);
        assert!("robot".parse::<PlanKind>().is_err());
    }
}
