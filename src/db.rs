use anyhow::Context;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "courses.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("failed to create workspace {}", workspace.to_string_lossy()))?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.to_string_lossy()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            location TEXT,
            description TEXT,
            active INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    // Children reference their parent by FK column only (no ON DELETE CASCADE);
    // writers delete holes before tee boxes.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tee_boxes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tee_boxes_course ON tee_boxes(course_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS holes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tee_box_id INTEGER NOT NULL,
            number INTEGER NOT NULL,
            distance INTEGER NOT NULL,
            par INTEGER NOT NULL,
            hcp_index INTEGER NOT NULL,
            FOREIGN KEY(tee_box_id) REFERENCES tee_boxes(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_holes_tee_box ON holes(tee_box_id, number)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
pub fn open_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    init_schema(&conn).expect("init schema");
    conn
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .expect("prepare");
        stmt.query_map([], |r| r.get::<_, String>(0))
            .expect("query")
            .collect::<Result<Vec<_>, _>>()
            .expect("collect")
    }

    #[test]
    fn schema_creates_three_tables_and_is_idempotent() {
        let conn = open_memory();
        init_schema(&conn).expect("second init");
        let names = table_names(&conn);
        for t in ["courses", "tee_boxes", "holes"] {
            assert!(names.iter().any(|n| n == t), "missing table {t}");
        }
    }

    #[test]
    fn active_defaults_to_true() {
        let conn = open_memory();
        conn.execute("INSERT INTO courses(name) VALUES('Plain')", [])
            .expect("insert");
        let active: bool = conn
            .query_row("SELECT active FROM courses", [], |r| r.get(0))
            .expect("read");
        assert!(active);
    }

    #[test]
    fn open_db_creates_workspace_file() {
        let dir = std::env::temp_dir().join(format!(
            "coursed-db-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        let conn = open_db(&dir).expect("open");
        drop(conn);
        assert!(dir.join(DB_FILE_NAME).is_file());
        let _ = std::fs::remove_dir_all(dir);
    }
}
