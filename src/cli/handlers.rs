use anyhow::{anyhow, Result};
use chrono::Duration;
use rusqlite::Connection;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::cli::args::{
    FacultyCommands, MarksCommands, MarksInput, PlanCommands, ResourceCommands, SummaryCommands,
};
use crate::clock::{format_date, Clock};
use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, ResourceRepo, RosterRepo, SubjectRepo, SummaryRepo};
use crate::error::InputError;
use crate::models::{NewPlan, PlanEntry, Resource, ResourceKind, Student, SubjectRecord, Summary};
use crate::performance::{
    PerformanceReport, ProctorReport, Strength, SubjectCohort, MAX_INTERNAL_MARKS,
};
use crate::planner::board::{self, entries_for_tab, validate_new_plan, Progress};
use crate::planner::Tab;
use crate::study;
use crate::utils::format::{format_iso_long, format_long_date, format_percent, pad, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const PINK: &str = "\x1b[38;2;236;72;153m";
const BLUE: &str = "\x1b[38;2;59;130;246m";

fn strength_color(strength: Strength) -> &'static str {
    match strength {
        Strength::Strong => GREEN,
        Strength::Average => AMBER,
        Strength::Weak => RED,
    }
}

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("Vidyamitra is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }

    println!();
    println_colored!(PINK, "  Vidyamitra setup");
    println!();

    let name = prompt(&format!("  Your name [{}]: ", config.student.name))?;
    if !name.trim().is_empty() {
        config.student.name = name.trim().to_string();
    }

    let usn = prompt(&format!("  USN [{}]: ", config.student.usn))?;
    if !usn.trim().is_empty() {
        config.student.usn = usn.trim().to_string();
    }

    loop {
        let time = prompt(&format!("  Daily study time HH:MM [{}]: ", config.planner.study_time))?;
        let time = time.trim();
        if time.is_empty() {
            break;
        }
        match chrono::NaiveTime::parse_from_str(time, "%H:%M") {
            Ok(t) => {
                config.planner.study_time = t.format("%H:%M").to_string();
                break;
            }
            Err(_) => println_colored!(RED, "  {}", InputError::InvalidTime(time.to_string())),
        }
    }

    config.save()?;
    MetaRepo::set(conn, "setup_done", "1")?;
    println!();
    println_colored!(GREEN, "  ✓ Saved. Run `vidyamitra` to open the dashboard.");
    Ok(())
}

// ─── Plan ────────────────────────────────────────────────────────────────────

pub fn handle_plan(
    conn: &Connection,
    config: &AppConfig,
    action: &PlanCommands,
    clock: &dyn Clock,
) -> Result<()> {
    match action {
        PlanCommands::Show { tab } => {
            let tab: Tab = tab.parse()?;
            let plans = study::load_reconciled(conn, clock)?;
            print_plans(&plans, tab, clock);
        }
        PlanCommands::Generate => {
            let (plans, added) = study::generate_week(conn, config, clock)?;
            if added == 0 {
                println_colored!(DIM, "  This week's sessions are already planned");
            } else {
                println_colored!(GREEN, "  ✓ Added {} study sessions", added);
            }
            print_plans(&plans, Tab::All, clock);
        }
        PlanCommands::Add {
            subject,
            date,
            time,
            duration,
        } => {
            let new_plan = validate_new_plan(NewPlan {
                subject: subject.clone(),
                date: date.clone(),
                time: time.clone(),
                duration: duration.clone(),
            })?;
            let plans = study::add_plan(conn, new_plan, clock)?;
            if let Some(added) = plans.last() {
                if added.is_overdue {
                    println_colored!(
                        AMBER,
                        "  ✓ Added {} ({}), date has passed so it is due today",
                        added.subject,
                        added.id
                    );
                } else {
                    println_colored!(GREEN, "  ✓ Added {} on {} ({})", added.subject, added.date, added.id);
                }
            }
        }
        PlanCommands::Toggle { id } => match study::toggle_plan(conn, id, clock)? {
            Some(entry) if entry.completed => {
                println_colored!(GREEN, "  ✓ {} marked complete", entry.subject);
            }
            Some(entry) => {
                println_colored!(DIM, "  ○ {} marked not done", entry.subject);
            }
            None => {
                log::warn!("toggle requested for unknown plan id {}", id);
                println_colored!(AMBER, "  No plan entry with id '{}'", id);
            }
        },
    }
    Ok(())
}

fn print_plans(plans: &[PlanEntry], tab: Tab, clock: &dyn Clock) {
    let today = clock.today();
    let visible = entries_for_tab(plans, tab, today);

    println!();
    println_colored!(PINK, "  Study Schedule: {}", tab.label());
    println!();

    if visible.is_empty() {
        println_colored!(DIM, "  No plans for {}. Enjoy your day or add a new plan!", tab.label().to_lowercase());
        println!();
        return;
    }

    let mut last_date: Option<&str> = None;
    for p in &visible {
        if tab == Tab::All && last_date != Some(p.date.as_str()) {
            println_colored!(BOLD, "  {}", format_iso_long(&p.date));
            last_date = Some(p.date.as_str());
        }
        let check = if p.completed { "●" } else { "○" };
        let color = if p.kind == crate::models::PlanKind::Ai { BLUE } else { PINK };
        let time = p.time.as_deref().unwrap_or("--:--");
        let overdue = if p.is_overdue && !p.completed {
            format!("  {}(Overdue)\x1b[0m", RED)
        } else {
            String::new()
        };
        println!(
            "  {} {}{}\x1b[0m {}  {}  {}{}  {}{}\x1b[0m",
            check,
            color,
            p.kind.icon(),
            time,
            pad(&p.subject, 24),
            pad(&p.duration, 10),
            overdue,
            DIM,
            p.id
        );
    }

    let Progress { done, total, overdue } = board::progress(visible.iter().copied());
    println!();
    println_colored!(
        DIM,
        "  {} {}/{} done{}",
        progress_bar(done as u32, total as u32, 12),
        done,
        total,
        if overdue > 0 { format!(", {} overdue", overdue) } else { String::new() }
    );
    println!();
}

// ─── Marks ───────────────────────────────────────────────────────────────────

/// Validates marks entered on the command line.
fn record_from_input(input: &MarksInput) -> Result<SubjectRecord> {
    let subject = input.subject.trim();
    if subject.is_empty() {
        return Err(InputError::EmptySubject.into());
    }
    if !(0.0..=MAX_INTERNAL_MARKS).contains(&input.total) {
        return Err(InputError::TotalOutOfRange(input.total, MAX_INTERNAL_MARKS).into());
    }
    if input.attended > input.held {
        return Err(anyhow!("attended ({}) cannot exceed held ({})", input.attended, input.held));
    }
    Ok(SubjectRecord {
        subject: subject.to_string(),
        ia1: input.ia1,
        ia2: input.ia2,
        quiz: input.quiz,
        aat: input.aat,
        total: input.total,
        class_average: input.class_avg,
        attended: input.attended,
        held: input.held,
    })
}

pub fn handle_marks(conn: &Connection, config: &AppConfig, action: &MarksCommands) -> Result<()> {
    match action {
        MarksCommands::Set(input) => {
            let record = record_from_input(input)?;
            let subject = record.subject.as_str();
            let verb = match SubjectRepo::find(conn, subject)? {
                Some(_) => "Updated",
                None => "Recorded",
            };
            SubjectRepo::upsert(conn, &record)?;
            let score = crate::performance::score_percent(record.total);
            let strength = Strength::classify(score, config.planner.weak_threshold);
            println_colored!(
                strength_color(strength),
                "  ✓ {} {}: {}% ({})",
                verb,
                subject,
                score,
                strength.label()
            );
        }
        MarksCommands::Remove { subject } => {
            if SubjectRepo::remove(conn, subject)? {
                println_colored!(GREEN, "  ✓ Removed {}", subject);
            } else {
                println_colored!(AMBER, "  No subject named '{}'", subject);
            }
        }
        MarksCommands::List => {
            let records = SubjectRepo::get_all(conn)?;
            let report = PerformanceReport::from_records(&records, config.planner.weak_threshold);
            println!();
            println_colored!(PINK, "  Performance vs Class Average");
            println!();
            if report.subjects.is_empty() {
                println_colored!(DIM, "  No marks recorded. Use `vidyamitra marks set`.");
            }
            for s in &report.subjects {
                println!(
                    "  {}  {}{} {:>3}%\x1b[0m  {}class {:>3.0}%  attendance {}\x1b[0m",
                    pad(&s.subject, 24),
                    strength_color(s.strength),
                    progress_bar(s.score, 100, 10),
                    s.score,
                    DIM,
                    s.class_average,
                    format_percent(s.attendance)
                );
                if !s.components.is_empty() {
                    println_colored!(DIM, "  {}  {}", pad("", 24), s.components.summary());
                }
            }
            println!();
        }
        MarksCommands::Weak => {
            let weak = study::current_weak_subjects(conn, config)?;
            if weak.is_empty() {
                println_colored!(GREEN, "  ✓ No weak subjects (threshold {}%)", config.planner.weak_threshold);
            } else {
                println_colored!(RED, "  Weak subjects (below {}%):", config.planner.weak_threshold);
                for s in &weak {
                    println!("  • {}", s);
                }
            }
        }
    }
    Ok(())
}

// ─── 3R summaries ────────────────────────────────────────────────────────────

pub fn handle_summary(
    conn: &Connection,
    config: &AppConfig,
    action: &SummaryCommands,
    clock: &dyn Clock,
) -> Result<()> {
    if !config.journal.enabled {
        println_colored!(DIM, "  The 3R journal is disabled in config.toml");
        return Ok(());
    }
    match action {
        SummaryCommands::Write { text } => {
            let content = text.join(" ");
            if content.trim().is_empty() {
                return Err(InputError::EmptySummary.into());
            }
            let today = clock.today_str();
            SummaryRepo::save(conn, &today, content.trim())?;
            println_colored!(GREEN, "  ✓ Summary saved for {}", format_long_date(clock.today()));
        }
        SummaryCommands::Recall => {
            let yesterday = format_date(clock.today() - Duration::days(1));
            println!();
            println_colored!(PINK, "  Yesterday's Summary");
            println!();
            match SummaryRepo::get(conn, &yesterday)? {
                Some(summary) => print_wrapped(&summary.content),
                None => println_colored!(DIM, "  You haven't created a summary for yesterday yet."),
            }
            println!();
        }
        SummaryCommands::Revise => {
            let all = SummaryRepo::list_all(conn)?;
            println!();
            println_colored!(PINK, "  All Study Summaries");
            println!();
            if all.is_empty() {
                println_colored!(DIM, "  No summaries saved yet.");
            }
            for Summary { date, content } in &all {
                println_colored!(BOLD, "  {}", format_iso_long(date));
                print_wrapped(content);
                println!();
            }
        }
    }
    Ok(())
}

fn print_wrapped(text: &str) {
    for line in text.lines() {
        println!("  {}", line);
    }
}

// ─── Resources ───────────────────────────────────────────────────────────────

pub fn handle_resources(conn: &Connection, action: &ResourceCommands) -> Result<()> {
    match action {
        ResourceCommands::Add {
            subject,
            topic,
            title,
            url,
            kind,
        } => {
            let kind: ResourceKind = kind.parse()?;
            let resource = Resource {
                id: None,
                subject: subject.trim().to_string(),
                topic: topic.trim().to_string(),
                title: title.trim().to_string(),
                kind,
                url: url.trim().to_string(),
            };
            if ResourceRepo::add(conn, &resource)? {
                println_colored!(GREEN, "  ✓ Added {} under {} / {}", resource.title, resource.subject, resource.topic);
            } else {
                println_colored!(DIM, "  Already filed under {} / {}", resource.subject, resource.topic);
            }
        }
        ResourceCommands::List { subject: None, .. } => {
            let subjects = ResourceRepo::subjects(conn)?;
            println!();
            println_colored!(PINK, "  Study Resources");
            println!();
            for s in &subjects {
                let topics = ResourceRepo::topics(conn, s)?;
                println!("  {}  {}{} topics\x1b[0m", pad(s, 24), DIM, topics.len());
            }
            println!();
        }
        ResourceCommands::List {
            subject: Some(subject),
            topic,
        } => {
            let resources = ResourceRepo::list(conn, subject, topic.as_deref())?;
            println!();
            if resources.is_empty() {
                println_colored!(DIM, "  No resources for {}", subject);
            }
            print_resources(&resources);
        }
        ResourceCommands::Search { query } => {
            let resources = ResourceRepo::search(conn, query)?;
            println!();
            if resources.is_empty() {
                println_colored!(DIM, "  Nothing matches '{}'", query);
            }
            print_resources(&resources);
        }
    }
    Ok(())
}

fn print_resources(resources: &[Resource]) {
    let mut last_topic: Option<(&str, &str)> = None;
    for r in resources {
        let key = (r.subject.as_str(), r.topic.as_str());
        if last_topic != Some(key) {
            println_colored!(PINK, "  {} / {}", r.subject, r.topic);
            last_topic = Some(key);
        }
        let color = match r.kind {
            ResourceKind::Video => PINK,
            ResourceKind::Article => BLUE,
        };
        println!(
            "    {}{:<8}\x1b[0m {}  {}{}\x1b[0m",
            color,
            r.kind.display_name(),
            r.title,
            DIM,
            r.url
        );
    }
    println!();
}

// ─── Faculty ─────────────────────────────────────────────────────────────────

fn score_cell(score: Option<u32>, weak_threshold: u32) -> String {
    match score {
        Some(s) => format!(
            "{}{:>4}%\x1b[0m",
            strength_color(Strength::classify(s, weak_threshold)),
            s
        ),
        None => format!("{}{:>5}\x1b[0m", DIM, "--"),
    }
}

pub fn handle_faculty(conn: &Connection, config: &AppConfig, action: &FacultyCommands) -> Result<()> {
    let weak_threshold = config.planner.weak_threshold;
    match action {
        FacultyCommands::AddStudent { usn, name, semester } => {
            let usn = usn.trim();
            if usn.is_empty() {
                return Err(anyhow!("USN must not be empty"));
            }
            RosterRepo::add_student(
                conn,
                &Student {
                    usn: usn.to_string(),
                    name: name.trim().to_string(),
                    semester: *semester,
                },
            )?;
            println_colored!(GREEN, "  ✓ {} ({}) on the roster", name.trim(), usn);
        }
        FacultyCommands::RemoveStudent { usn } => {
            if RosterRepo::remove_student(conn, usn)? {
                println_colored!(GREEN, "  ✓ Removed {}", usn);
            } else {
                println_colored!(AMBER, "  No student with USN '{}'", usn);
            }
        }
        FacultyCommands::Students => {
            let roster = RosterRepo::load(conn)?;
            println!();
            println_colored!(PINK, "  Roster ({} students)", roster.len());
            println!();
            for sm in &roster {
                println!(
                    "  {}  {}  {}{} subjects\x1b[0m",
                    pad(&sm.student.usn, 12),
                    pad(&sm.student.name, 24),
                    DIM,
                    sm.records.len()
                );
            }
            println!();
        }
        FacultyCommands::Marks { usn, marks } => {
            let record = record_from_input(marks)?;
            RosterRepo::set_marks(conn, usn, &record)?;
            let score = crate::performance::score_percent(record.total);
            println_colored!(
                strength_color(Strength::classify(score, weak_threshold)),
                "  ✓ {} {}: {}%",
                usn,
                record.subject,
                score
            );
        }
        FacultyCommands::Subject { subject } => {
            let roster = RosterRepo::load(conn)?;
            let cohort = SubjectCohort::from_roster(subject, &roster, weak_threshold);
            print_subject_cohort(&cohort, weak_threshold);
        }
        FacultyCommands::Proctor => {
            let roster = RosterRepo::load(conn)?;
            let report = ProctorReport::from_roster(&roster, weak_threshold);
            print_proctor_report(&report, weak_threshold);
        }
    }
    Ok(())
}

fn print_subject_cohort(cohort: &SubjectCohort, weak_threshold: u32) {
    println!();
    println_colored!(PINK, "  {}: {} of {} students recorded", cohort.subject, cohort.recorded(), cohort.rows.len());
    println!();
    for row in &cohort.rows {
        let bar = progress_bar(row.score.unwrap_or(0), 100, 10);
        print!("  {}  {} {}", pad(&row.name, 18), bar, score_cell(row.score, weak_threshold));
        if row.score.is_some() {
            print!("  {}attendance {}", DIM, format_percent(row.attendance));
            if !row.components.is_empty() {
                print!("  {}", row.components.summary());
            }
            print!("\x1b[0m");
        } else {
            print!("  {}no marks\x1b[0m", DIM);
        }
        println!();
    }
    let d = cohort.distribution;
    println!();
    println!(
        "  {}{} strong\x1b[0m  {}{} average\x1b[0m  {}{} weak\x1b[0m",
        GREEN, d.strong, AMBER, d.average, RED, d.weak
    );
    println_colored!(
        BOLD,
        "  Class average {}   Attendance {}",
        format_percent(cohort.class_average),
        format_percent(cohort.class_attendance)
    );
    println!();
}

fn print_proctor_report(report: &ProctorReport, weak_threshold: u32) {
    println!();
    println_colored!(PINK, "  Proctor view: {} students", report.students.len());
    println!();
    if report.subjects.is_empty() {
        println_colored!(DIM, "  No marks recorded. Use `vidyamitra faculty marks`.");
        println!();
        return;
    }

    let mut heading = format!("  {}", pad("", 18));
    for subject in &report.subjects {
        heading.push_str(&format!(" {}", pad(subject, 6)));
    }
    heading.push_str("   avg");
    println_colored!(DIM, "{}", heading);
    for row in &report.students {
        let mut line = format!("  {}", pad(&row.name, 18));
        for score in &row.scores {
            line.push_str(&format!(" {} ", score_cell(*score, weak_threshold)));
        }
        line.push_str(&format!("  {}", score_cell(row.average, weak_threshold)));
        println!("{}", line);
    }

    let d = report.distribution;
    println!();
    println!(
        "  {}{} strong\x1b[0m  {}{} average\x1b[0m  {}{} weak\x1b[0m",
        GREEN, d.strong, AMBER, d.average, RED, d.weak
    );
    println!();
    println_colored!(BOLD, "  Subject averages");
    for avg in &report.subject_averages {
        println!(
            "  {}  {} {}",
            pad(&avg.subject, 24),
            progress_bar(avg.average.unwrap_or(0), 100, 10),
            format_percent(avg.average)
        );
    }
    println!();
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig, clock: &dyn Clock) -> Result<()> {
    let records = SubjectRepo::get_all(conn)?;
    let report = PerformanceReport::from_records(&records, config.planner.weak_threshold);
    let plans = study::load_reconciled(conn, clock)?;
    let today = clock.today();
    let today_progress = board::progress(entries_for_tab(&plans, Tab::Today, today));
    let all_progress = board::progress(&plans);
    let week_start = format_date(today - Duration::days(6));
    let summaries = SummaryRepo::count_between(conn, &week_start, &clock.today_str())?;

    println!();
    println_colored!(PINK, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Overall average:  {}   Attendance: {}",
        format_percent(report.overall_average),
        format_percent(report.overall_attendance)
    );
    let b = report.breakdown;
    println!(
        "  Subjects:         {}  {}{} strong\x1b[0m  {}{} average\x1b[0m  {}{} weak\x1b[0m",
        b.total(), GREEN, b.strong, AMBER, b.average, RED, b.weak
    );
    let weak = report.weak_subjects();
    if !weak.is_empty() {
        println_colored!(RED, "  Focus on:         {}", weak.join(", "));
    }
    println!(
        "  Today's plan:     {} {}/{}",
        progress_bar(today_progress.done as u32, today_progress.total as u32, 12),
        today_progress.done,
        today_progress.total
    );
    if all_progress.overdue > 0 {
        println_colored!(AMBER, "  Overdue:          {} sessions", all_progress.overdue);
    } else {
        println_colored!(GREEN, "  Overdue:          0 sessions ✓");
    }
    println!("  Summaries (7d):   {}/7", summaries);
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct WeeklyExport<'a> {
    student: &'a str,
    date: String,
    performance: PerformanceReport,
    plans: Vec<&'a PlanEntry>,
    summaries: Vec<Summary>,
}

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool, clock: &dyn Clock) -> Result<()> {
    let today = clock.today();
    let today_str = clock.today_str();
    let week_start = format_date(today - Duration::days(6));
    let week_end = format_date(today + Duration::days(7));

    let records = SubjectRepo::get_all(conn)?;
    let report = PerformanceReport::from_records(&records, config.planner.weak_threshold);
    let plans = study::load_reconciled(conn, clock)?;
    let week_plans: Vec<&PlanEntry> = entries_for_tab(&plans, Tab::All, today)
        .into_iter()
        .filter(|p| p.date >= week_start && p.date <= week_end)
        .collect();
    let summaries: Vec<Summary> = SummaryRepo::list_all(conn)?
        .into_iter()
        .filter(|s| s.date >= week_start)
        .collect();

    if json {
        let export = WeeklyExport {
            student: &config.student.name,
            date: today_str,
            performance: report,
            plans: week_plans,
            summaries,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    println!("# vidyamitra: Weekly Summary");
    println!("# {}", today_str);
    println!();
    println!("Student: {}", config.student.name);
    if !config.student.usn.is_empty() {
        println!("USN:     {}", config.student.usn);
    }
    println!();
    println!("## Performance");
    for s in &report.subjects {
        println!(
            "  {}  {:>3}%  {}  {}",
            pad(&s.subject, 24),
            s.score,
            progress_bar(s.score, 100, 10),
            s.strength.label()
        );
        if !s.components.is_empty() {
            println!("  {}  {}", pad("", 24), s.components.summary());
        }
    }
    println!("  Overall: {}  Attendance: {}", format_percent(report.overall_average), format_percent(report.overall_attendance));
    println!();
    println!("## Study Plan");
    for p in &week_plans {
        let mark = if p.completed { "x" } else { " " };
        let overdue = if p.is_overdue && !p.completed { " (overdue)" } else { "" };
        println!(
            "  [{}] {} {}  {} ({}){}",
            mark,
            p.date,
            p.time.as_deref().unwrap_or("--:--"),
            p.subject,
            p.duration,
            overdue
        );
    }
    println!();
    println!("## 3R Summaries");
    for s in &summaries {
        println!("  {}: {}", s.date, s.content.lines().next().unwrap_or(""));
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(subject: &str, total: f64) -> MarksInput {
        MarksInput {
            subject: subject.to_string(),
            total,
            ia1: 14.0,
            ia2: 15.0,
            quiz: 8.0,
            aat: 9.0,
            class_avg: 72.0,
            attended: 18,
            held: 20,
        }
    }

    #[test]
    fn marks_input_keeps_components() {
        let record = record_from_input(&input("  DBMS ", 46.0)).unwrap();
        assert_eq!(record.subject, "DBMS");
        assert_eq!(record.components().summary(), "IA1 14  IA2 15  Quiz 8  AAT 9");
        assert_eq!(record.class_average, 72.0);
    }

    #[test]
    fn marks_input_is_validated() {
        let err = record_from_input(&input("DBMS", 71.0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::TotalOutOfRange(71.0, MAX_INTERNAL_MARKS))
        );
        assert!(record_from_input(&input(" ", 40.0)).is_err());

        let mut over = input("DBMS", 40.0);
        over.attended = 21;
        assert!(record_from_input(&over).is_err());
    }
}
