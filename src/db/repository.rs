use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::InputError;
use crate::models::{
    PlanEntry, PlanKind, Resource, ResourceKind, Student, StudentMarks, SubjectRecord, Summary,
};

fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ─── Plan repo ───────────────────────────────────────────────────────────────

pub struct PlanRepo;

impl PlanRepo {
    pub fn load_all(conn: &Connection) -> Result<Vec<PlanEntry>> {
        let mut stmt = conn.prepare(
            "SELECT id, date, subject, duration, time, completed, kind, is_overdue
             FROM plans ORDER BY position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PlanEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                subject: row.get(2)?,
                duration: row.get(3)?,
                time: row.get(4)?,
                completed: row.get::<_, i32>(5)? != 0,
                kind: parse_column::<PlanKind>(row, 6)?,
                is_overdue: row.get::<_, i32>(7)? != 0,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Replaces the stored collection with `plans`, keeping their order.
    fn write_all(conn: &Connection, plans: &[PlanEntry]) -> Result<()> {
        conn.execute("DELETE FROM plans", [])?;
        {
            let mut stmt = conn.prepare(
                "INSERT INTO plans (id, position, date, subject, duration, time, completed, kind, is_overdue)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for (position, p) in plans.iter().enumerate() {
                stmt.execute(params![
                    p.id,
                    position as i64,
                    p.date,
                    p.subject,
                    p.duration,
                    p.time,
                    p.completed as i32,
                    p.kind.as_str(),
                    p.is_overdue as i32,
                ])?;
            }
        }
        log::debug!("stored {} plan entries", plans.len());
        Ok(())
    }

    /// Load, transform and store the plan collection in one transaction.
    pub fn update<F>(conn: &Connection, f: F) -> Result<Vec<PlanEntry>>
    where
        F: FnOnce(Vec<PlanEntry>) -> Vec<PlanEntry>,
    {
        let tx = conn.unchecked_transaction()?;
        let plans = f(Self::load_all(&tx)?);
        Self::write_all(&tx, &plans)?;
        tx.commit()?;
        Ok(plans)
    }
}

// ─── Subject repo ────────────────────────────────────────────────────────────

pub struct SubjectRepo;

impl SubjectRepo {
    pub fn upsert(conn: &Connection, r: &SubjectRecord) -> Result<()> {
        conn.execute(
            "INSERT INTO subjects (subject, ia1, ia2, quiz, aat, total, class_average, attended, held)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(subject) DO UPDATE SET
                ia1 = ?2, ia2 = ?3, quiz = ?4, aat = ?5, total = ?6,
                class_average = ?7, attended = ?8, held = ?9",
            params![
                r.subject,
                r.ia1,
                r.ia2,
                r.quiz,
                r.aat,
                r.total,
                r.class_average,
                r.attended,
                r.held
            ],
        )?;
        Ok(())
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<SubjectRecord>> {
        let mut stmt = conn.prepare(
            "SELECT subject, ia1, ia2, quiz, aat, total, class_average, attended, held
             FROM subjects ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SubjectRecord {
                subject: row.get(0)?,
                ia1: row.get(1)?,
                ia2: row.get(2)?,
                quiz: row.get(3)?,
                aat: row.get(4)?,
                total: row.get(5)?,
                class_average: row.get(6)?,
                attended: row.get(7)?,
                held: row.get(8)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn find(conn: &Connection, subject: &str) -> Result<Option<SubjectRecord>> {
        let all = Self::get_all(conn)?;
        Ok(all
            .into_iter()
            .find(|r| r.subject.to_lowercase() == subject.to_lowercase()))
    }

    pub fn remove(conn: &Connection, subject: &str) -> Result<bool> {
        let n = conn.execute(
            "DELETE FROM subjects WHERE lower(subject) = lower(?1)",
            params![subject],
        )?;
        Ok(n > 0)
    }
}

// ─── Summary repo ────────────────────────────────────────────────────────────

pub struct SummaryRepo;

impl SummaryRepo {
    pub fn save(conn: &Connection, date: &str, content: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO summaries (date, content) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET content = ?2, updated_at = datetime('now')",
            params![date, content],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, date: &str) -> Result<Option<Summary>> {
        conn.query_row(
            "SELECT date, content FROM summaries WHERE date = ?1",
            params![date],
            |row| {
                Ok(Summary {
                    date: row.get(0)?,
                    content: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Newest first.
    pub fn list_all(conn: &Connection) -> Result<Vec<Summary>> {
        let mut stmt = conn.prepare("SELECT date, content FROM summaries ORDER BY date DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Summary {
                date: row.get(0)?,
                content: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn count_between(conn: &Connection, start: &str, end: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM summaries WHERE date >= ?1 AND date <= ?2",
            params![start, end],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }
}

// ─── Resource repo ───────────────────────────────────────────────────────────

pub struct ResourceRepo;

impl ResourceRepo {
    pub fn add(conn: &Connection, r: &Resource) -> Result<bool> {
        let n = conn.execute(
            "INSERT OR IGNORE INTO resources (subject, topic, title, kind, url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![r.subject, r.topic, r.title, r.kind.as_str(), r.url],
        )?;
        Ok(n > 0)
    }

    pub fn subjects(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT DISTINCT subject FROM resources ORDER BY subject")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn topics(conn: &Connection, subject: &str) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT topic FROM resources WHERE lower(subject) = lower(?1) ORDER BY topic",
        )?;
        let rows = stmt.query_map(params![subject], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn list(conn: &Connection, subject: &str, topic: Option<&str>) -> Result<Vec<Resource>> {
        let mut stmt = conn.prepare(
            "SELECT id, subject, topic, title, kind, url FROM resources
             WHERE lower(subject) = lower(?1) AND (?2 IS NULL OR lower(topic) = lower(?2))
             ORDER BY topic, id",
        )?;
        let rows = stmt.query_map(params![subject, topic], Self::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Case-insensitive match on topic or title.
    pub fn search(conn: &Connection, query: &str) -> Result<Vec<Resource>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = conn.prepare(
            "SELECT id, subject, topic, title, kind, url FROM resources
             WHERE lower(topic) LIKE ?1 OR lower(title) LIKE ?1
             ORDER BY subject, topic, id",
        )?;
        let rows = stmt.query_map(params![pattern], Self::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Resource> {
        Ok(Resource {
            id: Some(row.get(0)?),
            subject: row.get(1)?,
            topic: row.get(2)?,
            title: row.get(3)?,
            kind: parse_column::<ResourceKind>(row, 4)?,
            url: row.get(5)?,
        })
    }
}

// ─── Roster repo ─────────────────────────────────────────────────────────────

pub struct RosterRepo;

impl RosterRepo {
    /// Adds a student, or renames one already on the roster.
    pub fn add_student(conn: &Connection, s: &Student) -> Result<()> {
        conn.execute(
            "INSERT INTO students (usn, name, semester) VALUES (?1, ?2, ?3)
             ON CONFLICT(usn) DO UPDATE SET name = ?2, semester = ?3",
            params![s.usn, s.name, s.semester],
        )?;
        Ok(())
    }

    /// Removes a student and their marks.
    pub fn remove_student(conn: &Connection, usn: &str) -> Result<bool> {
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM student_marks WHERE usn = ?1", params![usn])?;
        let n = tx.execute("DELETE FROM students WHERE usn = ?1", params![usn])?;
        tx.commit()?;
        Ok(n > 0)
    }

    pub fn students(conn: &Connection) -> Result<Vec<Student>> {
        let mut stmt = conn.prepare("SELECT usn, name, semester FROM students ORDER BY usn")?;
        let rows = stmt.query_map([], |row| {
            Ok(Student {
                usn: row.get(0)?,
                name: row.get(1)?,
                semester: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn set_marks(conn: &Connection, usn: &str, r: &SubjectRecord) -> Result<()> {
        let known: Option<String> = conn
            .query_row("SELECT usn FROM students WHERE usn = ?1", params![usn], |row| row.get(0))
            .optional()?;
        if known.is_none() {
            return Err(InputError::UnknownStudent(usn.to_string()).into());
        }
        conn.execute(
            "INSERT INTO student_marks (usn, subject, ia1, ia2, quiz, aat, total, attended, held)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(usn, subject) DO UPDATE SET
                ia1 = ?3, ia2 = ?4, quiz = ?5, aat = ?6, total = ?7, attended = ?8, held = ?9",
            params![usn, r.subject, r.ia1, r.ia2, r.quiz, r.aat, r.total, r.attended, r.held],
        )?;
        log::debug!("marks for {} in {} stored", usn, r.subject);
        Ok(())
    }

    /// Every student with their marks, students by USN, marks in entry order.
    pub fn load(conn: &Connection) -> Result<Vec<StudentMarks>> {
        let mut stmt = conn.prepare(
            "SELECT usn, subject, ia1, ia2, quiz, aat, total, attended, held
             FROM student_marks ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            let usn: String = row.get(0)?;
            Ok((
                usn,
                SubjectRecord {
                    subject: row.get(1)?,
                    ia1: row.get(2)?,
                    ia2: row.get(3)?,
                    quiz: row.get(4)?,
                    aat: row.get(5)?,
                    total: row.get(6)?,
                    class_average: 0.0,
                    attended: row.get(7)?,
                    held: row.get(8)?,
                },
            ))
        })?;

        let mut by_usn: HashMap<String, Vec<SubjectRecord>> = HashMap::new();
        for row in rows {
            let (usn, record) = row?;
            by_usn.entry(usn).or_default().push(record);
        }

        Ok(Self::students(conn)?
            .into_iter()
            .map(|student| StudentMarks {
                records: by_usn.remove(&student.usn).unwrap_or_default(),
                student,
            })
            .collect())
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
