//! Read-modify-write cycles around the pure planner: load the stored plan
//! collection, apply one planner operation, store the result.

use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use rusqlite::Connection;

use crate::clock::{format_date, Clock};
use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, PlanRepo, SubjectRepo};
use crate::models::{NewPlan, PlanEntry};
use crate::performance::weak_subjects;
use crate::planner::board::{self, seed_subjects};
use crate::planner::generator::next_weekday;
use crate::planner::{reconcile_in_place, reconcile_with_clock, Generator};

const PLAN_CYCLE_KEY: &str = "plan_cycle";

/// A planning cycle is named by the Monday its generated week starts on.
fn cycle_start(today: NaiveDate) -> String {
    format_date(next_weekday(Weekday::Mon, today))
}

/// Weak subjects from the stored marks.
pub fn current_weak_subjects(conn: &Connection, config: &AppConfig) -> Result<Vec<String>> {
    let records = SubjectRepo::get_all(conn)?;
    Ok(weak_subjects(&records, config.planner.weak_threshold))
}

/// Loads plans and brings overdue entries forward to today.
pub fn load_reconciled(conn: &Connection, clock: &dyn Clock) -> Result<Vec<PlanEntry>> {
    let today = clock.today();
    let mut moved = 0;
    let plans = PlanRepo::update(conn, |mut plans| {
        moved = reconcile_in_place(&mut plans, today);
        plans
    })?;
    if moved > 0 {
        log::info!("{} overdue plan entries moved to {}", moved, today);
    }
    Ok(plans)
}

/// Generates this cycle's AI sessions and merges in the ones not stored yet.
/// Returns the collection and how many entries were added.
pub fn generate_week(
    conn: &Connection,
    config: &AppConfig,
    clock: &dyn Clock,
) -> Result<(Vec<PlanEntry>, usize)> {
    let seeds = seed_subjects(current_weak_subjects(conn, config)?);
    let generated = Generator::new(config.planner.study_time.clone()).generate_with_clock(&seeds, clock);
    let cycle = cycle_start(clock.today());

    let mut added = 0;
    let plans = PlanRepo::update(conn, |plans| {
        let (merged, n) = board::merge_generated(plans, generated);
        added = n;
        reconcile_with_clock(merged, clock)
    })?;
    MetaRepo::set(conn, PLAN_CYCLE_KEY, &cycle)?;
    log::info!("generated plan cycle starting {} ({} new entries)", cycle, added);
    Ok((plans, added))
}

/// Generates once per planning cycle; later calls in the same cycle only
/// reconcile.
pub fn ensure_week_generated(
    conn: &Connection,
    config: &AppConfig,
    clock: &dyn Clock,
) -> Result<Vec<PlanEntry>> {
    let cycle = cycle_start(clock.today());
    if MetaRepo::get(conn, PLAN_CYCLE_KEY)?.as_deref() == Some(cycle.as_str()) {
        return load_reconciled(conn, clock);
    }
    Ok(generate_week(conn, config, clock)?.0)
}

pub fn add_plan(conn: &Connection, new_plan: NewPlan, clock: &dyn Clock) -> Result<Vec<PlanEntry>> {
    let today = clock.today();
    let now_millis = clock.now_millis();
    PlanRepo::update(conn, |plans| board::add_manual(plans, new_plan, now_millis, today))
}

/// Toggles completion; `None` when no entry has `id`.
pub fn toggle_plan(conn: &Connection, id: &str, clock: &dyn Clock) -> Result<Option<PlanEntry>> {
    let today = clock.today();
    let plans = PlanRepo::update(conn, |plans| board::toggle_completed(plans, id, today))?;
    Ok(plans.into_iter().find(|p| p.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::db::migrations::run_migrations;
    use crate::models::{PlanKind, SubjectRecord};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn clock(s: &str) -> FixedClock {
        FixedClock::on(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn generation_uses_weak_subjects_from_marks() {
        let conn = setup();
        SubjectRepo::upsert(&conn, &SubjectRecord::new("DBMS", 63.0)).unwrap();
        SubjectRepo::upsert(&conn, &SubjectRecord::new("OS", 40.0)).unwrap();
        SubjectRepo::upsert(&conn, &SubjectRecord::new("CN", 30.0)).unwrap();

        let (plans, added) = generate_week(&conn, &AppConfig::default(), &clock("2024-03-14")).unwrap();
        assert_eq!(added, 5);
        let subjects: Vec<&str> = plans.iter().map(|p| p.subject.as_str()).collect();
        assert_eq!(subjects, vec!["OS", "CN", "OS", "General Revision", "CN"]);
    }

    #[test]
    fn regenerating_after_marks_change_replaces_pending_sessions() {
        let conn = setup();
        let config = AppConfig::default();
        let day = clock("2024-03-14");
        SubjectRepo::upsert(&conn, &SubjectRecord::new("DBMS", 30.0)).unwrap();
        generate_week(&conn, &config, &day).unwrap();

        SubjectRepo::upsert(&conn, &SubjectRecord::new("DBMS", 65.0)).unwrap();
        SubjectRepo::upsert(&conn, &SubjectRecord::new("OS", 20.0)).unwrap();
        let (plans, added) = generate_week(&conn, &config, &day).unwrap();

        assert_eq!(added, 2);
        assert_eq!(plans.len(), 5);
        let monday: Vec<&str> = plans
            .iter()
            .filter(|p| p.date == "2024-03-18")
            .map(|p| p.subject.as_str())
            .collect();
        assert_eq!(monday, vec!["OS"]);
        assert_eq!(PlanRepo::load_all(&conn).unwrap(), plans);
    }

    #[test]
    fn no_marks_means_revision_week() {
        let conn = setup();
        let (plans, _) = generate_week(&conn, &AppConfig::default(), &clock("2024-03-14")).unwrap();
        assert_eq!(plans[0].subject, "General Revision");
        assert_eq!(plans[1].subject, "Algorithms");
    }

    #[test]
    fn ensure_generates_once_per_cycle() {
        let conn = setup();
        let config = AppConfig::default();
        let first = ensure_week_generated(&conn, &config, &clock("2024-03-14")).unwrap();
        assert_eq!(first.len(), 5);

        toggle_plan(&conn, &first[0].id, &clock("2024-03-14")).unwrap();
        let again = ensure_week_generated(&conn, &config, &clock("2024-03-14")).unwrap();
        assert_eq!(again.len(), 5);
        assert!(again[0].completed);

        // Friday 15th: the next Monday is still the 18th, same cycle.
        let friday = ensure_week_generated(&conn, &config, &clock("2024-03-15")).unwrap();
        assert_eq!(friday.len(), 5);

        // Monday 18th starts a new cycle with different dates.
        let monday = ensure_week_generated(&conn, &config, &clock("2024-03-18")).unwrap();
        assert!(monday.len() > 5);
    }

    #[test]
    fn loading_moves_overdue_entries() {
        let conn = setup();
        generate_week(&conn, &AppConfig::default(), &clock("2024-03-14")).unwrap();
        let plans = load_reconciled(&conn, &clock("2024-03-19")).unwrap();
        let overdue: Vec<&PlanEntry> = plans.iter().filter(|p| p.is_overdue).collect();
        // Fri 15th and Mon 18th are behind the 19th.
        assert_eq!(overdue.len(), 2);
        assert!(overdue.iter().all(|p| p.date == "2024-03-19"));
        assert_eq!(PlanRepo::load_all(&conn).unwrap(), plans);
    }

    #[test]
    fn manual_add_and_toggle() {
        let conn = setup();
        let c = clock("2024-03-14");
        let plans = add_plan(
            &conn,
            NewPlan {
                subject: "Maths".into(),
                date: "2024-03-14".into(),
                time: Some("08:00".into()),
                duration: "30 min".into(),
            },
            &c,
        )
        .unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].kind, PlanKind::Manual);

        let toggled = toggle_plan(&conn, &plans[0].id, &c).unwrap().unwrap();
        assert!(toggled.completed);
        assert!(toggle_plan(&conn, "nope", &c).unwrap().is_none());
    }
}
