use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS plans (
            id          TEXT PRIMARY KEY,
            position    INTEGER NOT NULL,
            date        TEXT NOT NULL,
            subject     TEXT NOT NULL,
            duration    TEXT NOT NULL DEFAULT '',
            time        TEXT,
            completed   INTEGER NOT NULL DEFAULT 0,
            kind        TEXT NOT NULL CHECK(kind IN ('ai','manual')),
            is_overdue  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS subjects (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            subject        TEXT NOT NULL UNIQUE,
            ia1            REAL DEFAULT 0,
            ia2            REAL DEFAULT 0,
            quiz           REAL DEFAULT 0,
            aat            REAL DEFAULT 0,
            total          REAL NOT NULL,
            class_average  REAL DEFAULT 0,
            attended       INTEGER DEFAULT 0,
            held           INTEGER DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS summaries (
            date        TEXT PRIMARY KEY,
            content     TEXT NOT NULL,
            updated_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS resources (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            subject  TEXT NOT NULL,
            topic    TEXT NOT NULL,
            title    TEXT NOT NULL,
            kind     TEXT NOT NULL CHECK(kind IN ('video','article')),
            url      TEXT NOT NULL,
            UNIQUE(subject, topic, url)
        );

        CREATE TABLE IF NOT EXISTS students (
            usn       TEXT PRIMARY KEY,
            name      TEXT NOT NULL,
            semester  INTEGER DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS student_marks (
            usn       TEXT NOT NULL,
            subject   TEXT NOT NULL,
            ia1       REAL DEFAULT 0,
            ia2       REAL DEFAULT 0,
            quiz      REAL DEFAULT 0,
            aat       REAL DEFAULT 0,
            total     REAL NOT NULL,
            attended  INTEGER DEFAULT 0,
            held      INTEGER DEFAULT 0,
            PRIMARY KEY (usn, subject)
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    seed_resources(conn)?;
    Ok(())
}

fn seed_resources(conn: &Connection) -> Result<()> {
    let builtins = [
        ("Data Structures", "Linked Lists", "Linked list", "article",
            "https://en.wikipedia.org/wiki/Linked_list"),
        ("Data Structures", "Trees", "Binary search tree", "article",
            "https://en.wikipedia.org/wiki/Binary_search_tree"),
        ("Data Structures", "Hashing", "Hash table", "article",
            "https://en.wikipedia.org/wiki/Hash_table"),
        ("Algorithms", "Sorting", "Sorting algorithm", "article",
            "https://en.wikipedia.org/wiki/Sorting_algorithm"),
        ("Algorithms", "Dynamic Programming", "Dynamic programming", "article",
            "https://en.wikipedia.org/wiki/Dynamic_programming"),
        ("Algorithms", "Foundations", "MIT 6.006 Introduction to Algorithms", "video",
            "https://ocw.mit.edu/courses/6-006-introduction-to-algorithms-spring-2020/"),
    ];

    for (subject, topic, title, kind, url) in &builtins {
        conn.execute(
            "INSERT OR IGNORE INTO resources (subject, topic, title, kind, url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![subject, topic, title, kind, url],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_rerunnable() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let seeded: i64 = conn
            .query_row("SELECT COUNT(*) FROM resources", [], |row| row.get(0))
            .unwrap();
        assert_eq!(seeded, 6);
    }
}
