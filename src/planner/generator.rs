use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::clock::{format_date, Clock};
use crate::models::{PlanEntry, PlanKind};

pub const DEFAULT_STUDY_TIME: &str = "19:00";
pub const REVISION_SUBJECT: &str = "General Revision";
const PRIMARY_FALLBACK: &str = "Data Structures";
const SECONDARY_FALLBACK: &str = "Algorithms";

/// Which subject a weekday slot studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// First weak subject, or [`PRIMARY_FALLBACK`].
    Primary,
    /// Second weak subject, or [`SECONDARY_FALLBACK`].
    Secondary,
    Revision,
}

const WEEK: [(Weekday, Slot, &str); 5] = [
    (Weekday::Mon, Slot::Primary, "1 hour"),
    (Weekday::Tue, Slot::Secondary, "1.5 hours"),
    (Weekday::Wed, Slot::Primary, "1 hour"),
    (Weekday::Thu, Slot::Revision, "2 hours"),
    (Weekday::Fri, Slot::Secondary, "1 hour"),
];

/// Next occurrence of `target` strictly after `today`.
pub fn next_weekday(target: Weekday, today: NaiveDate) -> NaiveDate {
    let from = today.weekday().num_days_from_monday() as i64;
    let to = target.num_days_from_monday() as i64;
    let ahead = match (to - from).rem_euclid(7) {
        0 => 7,
        n => n,
    };
    today + Duration::days(ahead)
}

/// Seeds a Monday-to-Friday study week from a list of weak subjects.
#[derive(Debug, Clone)]
pub struct Generator {
    study_time: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            study_time: DEFAULT_STUDY_TIME.to_string(),
        }
    }
}

impl Generator {
    pub fn new(study_time: impl Into<String>) -> Self {
        Self {
            study_time: study_time.into(),
        }
    }

    /// Always returns five entries, Monday through Friday in that order.
    /// Only the first two weak subjects are used.
    pub fn generate(&self, weak_subjects: &[String], today: NaiveDate) -> Vec<PlanEntry> {
        let primary = weak_subjects
            .first()
            .map(String::as_str)
            .unwrap_or(PRIMARY_FALLBACK);
        let secondary = weak_subjects
            .get(1)
            .map(String::as_str)
            .unwrap_or(SECONDARY_FALLBACK);

        WEEK.iter()
            .map(|(weekday, slot, duration)| {
                let subject = match slot {
                    Slot::Primary => primary,
                    Slot::Secondary => secondary,
                    Slot::Revision => REVISION_SUBJECT,
                };
                let date = format_date(next_weekday(*weekday, today));
                PlanEntry {
                    id: format!("ai-{}-{}", date, subject),
                    date,
                    subject: subject.to_string(),
                    duration: duration.to_string(),
                    time: Some(self.study_time.clone()),
                    completed: false,
                    kind: PlanKind::Ai,
                    is_overdue: false,
                }
            })
            .collect()
    }

    pub fn generate_with_clock(&self, weak_subjects: &[String], clock: &dyn Clock) -> Vec<PlanEntry> {
        self.generate(weak_subjects, clock.today())
    }
}

/// [`Generator::generate`] with the default study time.
#[cfg(test)]
pub(crate) fn generate_weekly_plan(weak_subjects: &[String], today: NaiveDate) -> Vec<PlanEntry> {
    Generator::default().generate(weak_subjects, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn subjects(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn thursday_week_matches_reference_schedule() {
        let plan = generate_weekly_plan(&subjects(&["Math", "Physics"]), date("2024-03-14"));
        let got: Vec<(&str, &str, &str)> = plan
            .iter()
            .map(|p| (p.date.as_str(), p.subject.as_str(), p.duration.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("2024-03-18", "Math", "1 hour"),
                ("2024-03-19", "Physics", "1.5 hours"),
                ("2024-03-20", "Math", "1 hour"),
                ("2024-03-21", "General Revision", "2 hours"),
                ("2024-03-15", "Physics", "1 hour"),
            ]
        );
    }

    #[test]
    fn entries_carry_ai_defaults() {
        let plan = generate_weekly_plan(&subjects(&["Math"]), date("2024-03-14"));
        for entry in &plan {
            assert_eq!(entry.time.as_deref(), Some("19:00"));
            assert!(!entry.completed);
            assert!(!entry.is_overdue);
            assert_eq!(entry.kind, PlanKind::Ai);
            assert_eq!(entry.id, format!("ai-{}-{}", entry.date, entry.subject));
        }
    }

    #[test]
    fn always_five_weekdays_whatever_the_input_length() {
        let today = date("2024-03-14");
        for weak in [
            subjects(&[]),
            subjects(&["DBMS"]),
            subjects(&["DBMS", "OS"]),
            subjects(&["DBMS", "OS", "CN", "TOC"]),
        ] {
            let plan = generate_weekly_plan(&weak, today);
            assert_eq!(plan.len(), 5);
            let weekdays: Vec<Weekday> = plan.iter().map(|p| date(&p.date).weekday()).collect();
            assert_eq!(
                weekdays,
                vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
            );
        }
    }

    #[test]
    fn missing_slots_fall_back_to_defaults() {
        let plan = generate_weekly_plan(&[], date("2024-03-14"));
        let names: Vec<&str> = plan.iter().map(|p| p.subject.as_str()).collect();
        assert_eq!(
            names,
            vec!["Data Structures", "Algorithms", "Data Structures", "General Revision", "Algorithms"]
        );

        let plan = generate_weekly_plan(&subjects(&["DBMS"]), date("2024-03-14"));
        assert_eq!(plan[0].subject, "DBMS");
        assert_eq!(plan[1].subject, "Algorithms");
    }

    #[test]
    fn extra_weak_subjects_are_ignored() {
        let plan = generate_weekly_plan(&subjects(&["A", "B", "C"]), date("2024-03-14"));
        assert!(plan.iter().all(|p| p.subject != "C"));
    }

    #[test]
    fn never_schedules_today_or_earlier() {
        let start = date("2024-03-01");
        for offset in 0..14 {
            let today = start + Duration::days(offset);
            let today_str = format_date(today);
            for entry in generate_weekly_plan(&subjects(&["X", "Y"]), today) {
                assert!(entry.date > today_str, "{} on {}", entry.date, today_str);
                assert!(date(&entry.date) <= today + Duration::days(7));
            }
        }
    }

    #[test]
    fn same_weekday_rolls_a_full_week() {
        let monday = date("2024-03-18");
        assert_eq!(next_weekday(Weekday::Mon, monday), date("2024-03-25"));
        assert_eq!(next_weekday(Weekday::Tue, monday), date("2024-03-19"));
        let sunday = date("2024-03-17");
        assert_eq!(next_weekday(Weekday::Mon, sunday), date("2024-03-18"));
        assert_eq!(next_weekday(Weekday::Fri, sunday), date("2024-03-22"));
    }

    #[test]
    fn regeneration_is_stable_in_identity() {
        let weak = subjects(&["Math", "Physics"]);
        let a = generate_weekly_plan(&weak, date("2024-03-14"));
        let b = generate_weekly_plan(&weak, date("2024-03-14"));
        assert_eq!(a, b);
    }

    #[test]
    fn study_time_is_configurable() {
        let generator = Generator::new("06:30");
        let clock = FixedClock::on(date("2024-03-14"));
        let plan = generator.generate_with_clock(&subjects(&["Math"]), &clock);
        assert!(plan.iter().all(|p| p.time.as_deref() == Some("06:30")));
    }
}
