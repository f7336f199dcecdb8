use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;
use std::str::FromStr;

use crate::clock::{format_date, DATE_FORMAT};
use crate::error::InputError;
use crate::models::{NewPlan, PlanEntry, PlanKind};
use crate::planner::generator::REVISION_SUBJECT;
use crate::planner::reconciler::reconcile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Today,
    Tomorrow,
    Upcoming,
    All,
}

impl Tab {
    /// Tabs shown in the dashboard, left to right.
    pub const DASHBOARD: [Tab; 3] = [Tab::Today, Tab::Tomorrow, Tab::Upcoming];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Today => "Today",
            Tab::Tomorrow => "Tomorrow",
            Tab::Upcoming => "Upcoming",
            Tab::All => "All",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Today => Tab::Tomorrow,
            Tab::Tomorrow => Tab::Upcoming,
            Tab::Upcoming | Tab::All => Tab::Today,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::Today | Tab::All => Tab::Upcoming,
            Tab::Tomorrow => Tab::Today,
            Tab::Upcoming => Tab::Tomorrow,
        }
    }
}

impl FromStr for Tab {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(Tab::Today),
            "tomorrow" => Ok(Tab::Tomorrow),
            "upcoming" => Ok(Tab::Upcoming),
            "all" => Ok(Tab::All),
            _ => Err(InputError::UnknownTab(s.to_string())),
        }
    }
}

/// Entries visible under `tab`, ordered by time of day.
pub fn entries_for_tab<'a>(plans: &'a [PlanEntry], tab: Tab, today: NaiveDate) -> Vec<&'a PlanEntry> {
    let today_str = format_date(today);
    let tomorrow_str = format_date(today + Duration::days(1));

    let mut visible: Vec<&PlanEntry> = plans
        .iter()
        .filter(|p| match tab {
            Tab::Today => p.date == today_str,
            Tab::Tomorrow => p.date == tomorrow_str,
            Tab::Upcoming => p.date > tomorrow_str,
            Tab::All => true,
        })
        .collect();

    if tab == Tab::All {
        visible.sort_by(|a, b| (a.date.as_str(), a.sort_time()).cmp(&(b.date.as_str(), b.sort_time())));
    } else {
        visible.sort_by(|a, b| a.sort_time().cmp(b.sort_time()));
    }
    visible
}

/// Subjects handed to the generator. An empty weak list still yields a
/// revision-led week.
pub fn seed_subjects(weak_subjects: Vec<String>) -> Vec<String> {
    if weak_subjects.is_empty() {
        vec![REVISION_SUBJECT.to_string()]
    } else {
        weak_subjects
    }
}

/// Timestamp-based id, bumped until it collides with nothing in `plans`.
pub fn fresh_manual_id(plans: &[PlanEntry], now_millis: i64) -> String {
    let taken: HashSet<&str> = plans.iter().map(|p| p.id.as_str()).collect();
    let mut stamp = now_millis;
    loop {
        let id = format!("manual-{}", stamp);
        if !taken.contains(id.as_str()) {
            return id;
        }
        stamp += 1;
    }
}

/// Checks a user-entered plan and normalises its date and time.
pub fn validate_new_plan(plan: NewPlan) -> Result<NewPlan, InputError> {
    let subject = plan.subject.trim().to_string();
    if subject.is_empty() {
        return Err(InputError::EmptySubject);
    }
    let date = NaiveDate::parse_from_str(plan.date.trim(), DATE_FORMAT)
        .map_err(|_| InputError::InvalidDate(plan.date.clone()))?;
    let time = match plan.time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(t) => {
            let parsed = NaiveTime::parse_from_str(t, "%H:%M")
                .map_err(|_| InputError::InvalidTime(t.to_string()))?;
            Some(parsed.format("%H:%M").to_string())
        }
    };
    Ok(NewPlan {
        subject,
        date: format_date(date),
        time,
        duration: plan.duration.trim().to_string(),
    })
}

/// Appends a manual entry and reconciles the result.
pub fn add_manual(mut plans: Vec<PlanEntry>, new_plan: NewPlan, now_millis: i64, today: NaiveDate) -> Vec<PlanEntry> {
    let id = fresh_manual_id(&plans, now_millis);
    plans.push(PlanEntry {
        id,
        date: new_plan.date,
        subject: new_plan.subject,
        duration: new_plan.duration,
        time: new_plan.time,
        completed: false,
        kind: PlanKind::Manual,
        is_overdue: false,
    });
    reconcile(plans, today)
}

/// Flips completion on the entry with `id` and reconciles. Unknown ids
/// leave the collection as it was, apart from reconciliation.
pub fn toggle_completed(plans: Vec<PlanEntry>, id: &str, today: NaiveDate) -> Vec<PlanEntry> {
    let plans = plans
        .into_iter()
        .map(|mut p| {
            if p.id == id {
                p.completed = !p.completed;
            }
            p
        })
        .collect();
    reconcile(plans, today)
}

/// Merges a freshly generated week into `existing`.
///
/// Pending AI entries on one of the generated dates are dropped unless the
/// new week has the same id, so each weekday keeps a single generated
/// session. Manual and completed entries are kept, as is the state of every
/// entry whose id survives. Returns the collection and how many entries were
/// added.
pub fn merge_generated(mut existing: Vec<PlanEntry>, generated: Vec<PlanEntry>) -> (Vec<PlanEntry>, usize) {
    let slots: HashSet<String> = generated.iter().map(|p| p.date.clone()).collect();
    let fresh: HashSet<String> = generated.iter().map(|p| p.id.clone()).collect();
    let before = existing.len();
    existing.retain(|p| {
        p.kind != PlanKind::Ai || p.completed || !slots.contains(&p.date) || fresh.contains(&p.id)
    });
    if existing.len() < before {
        log::debug!("replaced {} stale generated entries", before - existing.len());
    }

    let mut taken: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();
    let mut added = 0;
    for entry in generated {
        if taken.insert(entry.id.clone()) {
            existing.push(entry);
            added += 1;
        }
    }
    (existing, added)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub overdue: usize,
}

pub fn progress<'a>(plans: impl IntoIterator<Item = &'a PlanEntry>) -> Progress {
    plans.into_iter().fold(Progress::default(), |mut acc, p| {
        acc.total += 1;
        if p.completed {
            acc.done += 1;
        } else if p.is_overdue {
            acc.overdue += 1;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::generator::generate_weekly_plan;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: &str, date: &str, time: Option<&str>) -> PlanEntry {
        PlanEntry {
            id: id.to_string(),
            date: date.to_string(),
            subject: "OS".to_string(),
            duration: "1 hour".to_string(),
            time: time.map(str::to_string),
            completed: false,
            kind: PlanKind::Manual,
            is_overdue: false,
        }
    }

    fn ids(entries: &[&PlanEntry]) -> Vec<String> {
        entries.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn tabs_split_by_date_and_sort_by_time() {
        let plans = vec![
            entry("late", "2024-03-14", Some("21:00")),
            entry("early", "2024-03-14", Some("07:30")),
            entry("untimed", "2024-03-14", None),
            entry("tomorrow", "2024-03-15", Some("10:00")),
            entry("later", "2024-03-18", None),
        ];
        let today = date("2024-03-14");
        assert_eq!(ids(&entries_for_tab(&plans, Tab::Today, today)), vec!["untimed", "early", "late"]);
        assert_eq!(ids(&entries_for_tab(&plans, Tab::Tomorrow, today)), vec!["tomorrow"]);
        assert_eq!(ids(&entries_for_tab(&plans, Tab::Upcoming, today)), vec!["later"]);
        assert_eq!(entries_for_tab(&plans, Tab::All, today).len(), 5);
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Upcoming.next(), Tab::Today);
        assert_eq!(Tab::Today.prev(), Tab::Upcoming);
        assert_eq!("Tomorrow".parse::<Tab>().unwrap(), Tab::Tomorrow);
        assert!("yesterday".parse::<Tab>().is_err());
    }

    #[test]
    fn empty_weak_list_seeds_revision() {
        let seeds = seed_subjects(vec![]);
        let plan = generate_weekly_plan(&seeds, date("2024-03-14"));
        let names: Vec<&str> = plan.iter().map(|p| p.subject.as_str()).collect();
        assert_eq!(
            names,
            vec!["General Revision", "Algorithms", "General Revision", "General Revision", "Algorithms"]
        );
        assert_eq!(seed_subjects(vec!["OS".into()]), vec!["OS".to_string()]);
    }

    #[test]
    fn manual_ids_never_collide() {
        let plans = vec![entry("manual-100", "2024-03-14", None), entry("manual-101", "2024-03-14", None)];
        assert_eq!(fresh_manual_id(&plans, 100), "manual-102");
        assert_eq!(fresh_manual_id(&plans, 5), "manual-5");
    }

    #[test]
    fn adding_a_past_plan_marks_it_overdue() {
        let new_plan = NewPlan {
            subject: "CN".into(),
            date: "2024-03-01".into(),
            time: Some("18:00".into()),
            duration: "45 min".into(),
        };
        let plans = add_manual(vec![], new_plan, 42, date("2024-03-14"));
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, "manual-42");
        assert_eq!(plans[0].kind, PlanKind::Manual);
        assert_eq!(plans[0].date, "2024-03-14");
        assert!(plans[0].is_overdue);
    }

    #[test]
    fn toggle_flips_only_the_match() {
        let plans = vec![entry("a", "2024-03-14", None), entry("b", "2024-03-14", None)];
        let plans = toggle_completed(plans, "b", date("2024-03-14"));
        assert!(!plans[0].completed);
        assert!(plans[1].completed);
        let plans = toggle_completed(plans, "b", date("2024-03-14"));
        assert!(!plans[1].completed);
    }

    #[test]
    fn toggle_of_unknown_id_only_reconciles() {
        let plans = vec![entry("a", "2024-03-10", None)];
        let out = toggle_completed(plans, "missing", date("2024-03-14"));
        assert_eq!(out.len(), 1);
        assert!(!out[0].completed);
        assert!(out[0].is_overdue);
    }

    #[test]
    fn merging_keeps_existing_state() {
        let today = date("2024-03-14");
        let weak = vec!["Math".to_string(), "Physics".to_string()];
        let mut first = generate_weekly_plan(&weak, today);
        first[0].completed = true;
        let (merged, added) = merge_generated(first.clone(), generate_weekly_plan(&weak, today));
        assert_eq!(added, 0);
        assert_eq!(merged, first);

        // DBMS replaces Math, Algorithms replaces Physics, Thursday stays
        let (merged, added) = merge_generated(merged, generate_weekly_plan(&["DBMS".to_string()], today));
        assert_eq!(added, 4);
        assert_eq!(merged.len(), 6);
        assert!(merged.iter().all(|p| p.subject != "Physics"));
        // the completed Monday session survives next to its replacement
        let monday: Vec<&str> = merged
            .iter()
            .filter(|p| p.date == "2024-03-18")
            .map(|p| p.subject.as_str())
            .collect();
        assert_eq!(monday, vec!["Math", "DBMS"]);
    }

    #[test]
    fn merging_keeps_manual_entries_on_generated_dates() {
        let today = date("2024-03-14");
        let mut plans = generate_weekly_plan(&["Math".to_string()], today);
        plans = add_manual(
            plans,
            NewPlan {
                subject: "Lab record".into(),
                date: "2024-03-18".into(),
                time: None,
                duration: "30 min".into(),
            },
            1_710_000_000_000,
            today,
        );
        let (merged, added) = merge_generated(plans, generate_weekly_plan(&["OS".to_string()], today));
        assert_eq!(added, 2);
        assert_eq!(merged.len(), 6);
        assert!(merged.iter().any(|p| p.subject == "Lab record"));
        assert!(merged.iter().all(|p| p.subject != "Math"));
    }

    #[test]
    fn validation_normalises_input() {
        let ok = validate_new_plan(NewPlan {
            subject: "  Maths ".into(),
            date: "2024-3-5".into(),
            time: Some("7:05".into()),
            duration: "1 hour".into(),
        })
        .unwrap();
        assert_eq!(ok.subject, "Maths");
        assert_eq!(ok.date, "2024-03-05");
        assert_eq!(ok.time.as_deref(), Some("07:05"));

        let err = validate_new_plan(NewPlan {
            subject: "Maths".into(),
            date: "2024-02-30".into(),
            ..NewPlan::default()
        })
        .unwrap_err();
        assert_eq!(err, InputError::InvalidDate("2024-02-30".into()));

        let err = validate_new_plan(NewPlan {
            subject: " ".into(),
            date: "2024-03-05".into(),
            ..NewPlan::default()
        })
        .unwrap_err();
        assert_eq!(err, InputError::EmptySubject);

        let empty_time = validate_new_plan(NewPlan {
            subject: "OS".into(),
            date: "2024-03-05".into(),
            time: Some("".into()),
            ..NewPlan::default()
        })
        .unwrap();
        assert_eq!(empty_time.time, None);
    }

    #[test]
    fn progress_counts_done_and_overdue() {
        let mut plans = vec![
            entry("a", "2024-03-14", None),
            entry("b", "2024-03-14", None),
            entry("c", "2024-03-14", None),
        ];
        plans[0].completed = true;
        plans[1].is_overdue = true;
        assert_eq!(progress(&plans), Progress { done: 1, total: 3, overdue: 1 });
    }
}
