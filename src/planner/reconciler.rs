use chrono::NaiveDate;

use crate::clock::{format_date, Clock};
use crate::models::PlanEntry;

/// Moves every incomplete entry dated before `today` onto `today` and flags
/// it overdue. Returns how many entries were moved.
///
/// Dates compare as ISO strings, so a malformed date is left as is unless it
/// happens to sort before `today`.
pub fn reconcile_in_place(plans: &mut [PlanEntry], today: NaiveDate) -> usize {
    let today = format_date(today);
    let mut moved = 0;
    for entry in plans.iter_mut() {
        if !entry.completed && entry.date < today {
            log::debug!("rescheduling '{}' from {} to {}", entry.id, entry.date, today);
            entry.date = today.clone();
            entry.is_overdue = true;
            moved += 1;
        }
    }
    moved
}

pub fn reconcile(mut plans: Vec<PlanEntry>, today: NaiveDate) -> Vec<PlanEntry> {
    reconcile_in_place(&mut plans, today);
    plans
}

/// Reads the clock once and reconciles against that date.
pub fn reconcile_with_clock(plans: Vec<PlanEntry>, clock: &dyn Clock) -> Vec<PlanEntry> {
    reconcile(plans, clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::PlanKind;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: &str, date: &str, completed: bool) -> PlanEntry {
        PlanEntry {
            id: id.to_string(),
            date: date.to_string(),
            subject: "DBMS".to_string(),
            duration: "1 hour".to_string(),
            time: None,
            completed,
            kind: PlanKind::Manual,
            is_overdue: false,
        }
    }

    #[test]
    fn past_incomplete_entry_moves_to_today() {
        let out = reconcile(vec![entry("a", "2024-03-10", false)], date("2024-03-14"));
        assert_eq!(out[0].date, "2024-03-14");
        assert!(out[0].is_overdue);
        assert!(!out[0].completed);
    }

    #[test]
    fn today_and_future_entries_are_untouched() {
        let plans = vec![entry("a", "2024-03-14", false), entry("b", "2024-03-20", false)];
        let out = reconcile(plans.clone(), date("2024-03-14"));
        assert_eq!(out, plans);
    }

    #[test]
    fn completed_entries_are_frozen() {
        let plans = vec![entry("a", "2024-03-01", true), entry("b", "2024-04-01", true)];
        let out = reconcile(plans.clone(), date("2024-03-14"));
        assert_eq!(out, plans);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let plans = vec![
            entry("a", "2024-03-10", false),
            entry("b", "2024-03-11", true),
            entry("c", "2024-03-15", false),
        ];
        let today = date("2024-03-14");
        let once = reconcile(plans, today);
        let twice = reconcile(once.clone(), today);
        assert_eq!(once, twice);
    }

    #[test]
    fn counts_moved_entries_and_keeps_order() {
        let mut plans = vec![
            entry("a", "2024-03-10", false),
            entry("b", "2024-03-20", false),
            entry("c", "2024-03-13", false),
        ];
        let moved = reconcile_in_place(&mut plans, date("2024-03-14"));
        assert_eq!(moved, 2);
        let ids: Vec<&str> = plans.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(reconcile_in_place(&mut plans, date("2024-03-14")), 0);
    }

    #[test]
    fn overdue_flag_survives_completion_toggle_back() {
        let mut plans = reconcile(vec![entry("a", "2024-03-10", false)], date("2024-03-14"));
        plans[0].completed = true;
        let plans = reconcile(plans, date("2024-03-16"));
        assert_eq!(plans[0].date, "2024-03-14");
        assert!(plans[0].is_overdue);
    }

    #[test]
    fn uses_the_injected_clock() {
        let clock = FixedClock::on(date("2024-03-14"));
        let out = reconcile_with_clock(vec![entry("a", "2024-02-29", false)], &clock);
        assert_eq!(out[0].date, "2024-03-14");
    }
}
