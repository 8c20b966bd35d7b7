//! Read/write primitives over the `courses` / `tee_boxes` / `holes` tables.
//!
//! Every function takes the connection explicitly. Callers that need several
//! statements to land together pass a `Transaction` (it derefs to `Connection`).

use crate::error::{CourseError, CourseResult};
use crate::model::{Course, CourseSummary, Hole, HoleDraft, TeeBox};
use rusqlite::{Connection, OptionalExtension, Row};

/// Scalar course columns shared by insert and in-place update.
#[derive(Debug, Clone, Copy)]
pub struct CourseFields<'a> {
    pub name: &'a str,
    pub location: Option<&'a str>,
    pub description: Option<&'a str>,
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<CourseSummary> {
    Ok(CourseSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        active: row.get(4)?,
    })
}

pub fn fetch_summary(conn: &Connection, course_id: i64) -> CourseResult<CourseSummary> {
    conn.query_row(
        "SELECT id, name, location, description, active FROM courses WHERE id = ?",
        [course_id],
        summary_from_row,
    )
    .optional()?
    .ok_or(CourseError::NotFound(course_id))
}

/// Course row, then its tee boxes, then the holes of each tee box.
pub fn fetch_course(conn: &Connection, course_id: i64) -> CourseResult<Course> {
    let summary = fetch_summary(conn, course_id)?;

    let mut tee_stmt =
        conn.prepare("SELECT id, course_id, name FROM tee_boxes WHERE course_id = ? ORDER BY id")?;
    let mut tee_boxes = tee_stmt
        .query_map([course_id], |row| {
            Ok(TeeBox {
                id: row.get(0)?,
                course_id: row.get(1)?,
                name: row.get(2)?,
                holes: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut hole_stmt = conn.prepare(
        "SELECT id, tee_box_id, number, distance, par, hcp_index
         FROM holes
         WHERE tee_box_id = ?
         ORDER BY number, id",
    )?;
    for tee in tee_boxes.iter_mut() {
        tee.holes = hole_stmt
            .query_map([tee.id], |row| {
                Ok(Hole {
                    id: row.get(0)?,
                    tee_box_id: row.get(1)?,
                    number: row.get(2)?,
                    distance: row.get(3)?,
                    par: row.get(4)?,
                    hcp_index: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(Course {
        id: summary.id,
        name: summary.name,
        location: summary.location,
        description: summary.description,
        active: summary.active,
        tee_boxes,
    })
}

pub fn list_courses(conn: &Connection, include_inactive: bool) -> CourseResult<Vec<CourseSummary>> {
    let sql = if include_inactive {
        "SELECT id, name, location, description, active FROM courses ORDER BY id"
    } else {
        "SELECT id, name, location, description, active FROM courses WHERE active = 1 ORDER BY id"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], summary_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn course_count(conn: &Connection) -> CourseResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM courses", [], |r| r.get(0))?)
}

pub fn insert_course(conn: &Connection, fields: CourseFields<'_>) -> CourseResult<i64> {
    conn.execute(
        "INSERT INTO courses(name, location, description) VALUES(?, ?, ?)",
        (fields.name, fields.location, fields.description),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_tee_box(conn: &Connection, course_id: i64, name: &str) -> CourseResult<i64> {
    conn.execute("INSERT INTO tee_boxes(course_id, name) VALUES(?, ?)", (course_id, name))?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_hole(conn: &Connection, tee_box_id: i64, hole: &HoleDraft) -> CourseResult<i64> {
    conn.execute(
        "INSERT INTO holes(tee_box_id, number, distance, par, hcp_index) VALUES(?, ?, ?, ?, ?)",
        (
            tee_box_id,
            hole.number,
            hole.distance,
            hole.par,
            hole.hcp_index,
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns false when no row has that id.
pub fn update_course_fields(
    conn: &Connection,
    course_id: i64,
    fields: CourseFields<'_>,
) -> CourseResult<bool> {
    let n = conn.execute(
        "UPDATE courses SET name = ?, location = ?, description = ? WHERE id = ?",
        (fields.name, fields.location, fields.description, course_id),
    )?;
    Ok(n > 0)
}

pub fn set_active(conn: &Connection, course_id: i64, active: bool) -> CourseResult<CourseSummary> {
    let n = conn.execute("UPDATE courses SET active = ? WHERE id = ?", (active, course_id))?;
    if n == 0 {
        return Err(CourseError::NotFound(course_id));
    }
    fetch_summary(conn, course_id)
}

pub fn tee_box_ids_for_course(conn: &Connection, course_id: i64) -> CourseResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM tee_boxes WHERE course_id = ? ORDER BY id")?;
    let ids = stmt
        .query_map([course_id], |r| r.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

pub fn delete_holes_for_tee_box(conn: &Connection, tee_box_id: i64) -> CourseResult<usize> {
    Ok(conn.execute("DELETE FROM holes WHERE tee_box_id = ?", [tee_box_id])?)
}

pub fn delete_tee_boxes_for_course(conn: &Connection, course_id: i64) -> CourseResult<usize> {
    Ok(conn.execute("DELETE FROM tee_boxes WHERE course_id = ?", [course_id])?)
}

/// Empties all three tables, children first.
pub fn clear_all(conn: &Connection) -> CourseResult<()> {
    conn.execute("DELETE FROM holes", [])?;
    conn.execute("DELETE FROM tee_boxes", [])?;
    conn.execute("DELETE FROM courses", [])?;
    Ok(())
}
