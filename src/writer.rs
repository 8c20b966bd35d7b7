//! Transactional writes of whole course hierarchies.
//!
//! `Create` inserts course, tee boxes and holes in payload order.
//! `Replace` rewrites the course's scalar fields in place, deletes every hole
//! and tee box it owns (holes first), then inserts the submitted set under the
//! same course id. Either way a failed statement rolls back the whole call.

use crate::document::validate_draft;
use crate::error::{CourseError, CourseResult};
use crate::model::{CallerId, Course, CourseDraft, CourseSummary, TeeBoxDraft};
use crate::store::{self, CourseFields};
use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Replace(i64),
}

/// Runs `f` inside one transaction: commit on `Ok`, roll back on `Err`.
pub fn with_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Transaction<'_>) -> CourseResult<T>,
) -> CourseResult<T> {
    let tx = conn.unchecked_transaction()?;
    match f(&tx) {
        Ok(v) => {
            tx.commit()?;
            Ok(v)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

pub(crate) fn course_fields(draft: &CourseDraft) -> CourseFields<'_> {
    CourseFields {
        name: &draft.name,
        location: draft.location(),
        description: draft.description(),
    }
}

fn insert_children(
    conn: &Connection,
    course_id: i64,
    tee_boxes: &[TeeBoxDraft],
) -> CourseResult<()> {
    for tee in tee_boxes {
        let tee_box_id = store::insert_tee_box(conn, course_id, &tee.name)?;
        for hole in &tee.holes {
            store::insert_hole(conn, tee_box_id, hole)?;
        }
        debug!(course_id, tee_box_id, holes = tee.holes.len(), "inserted tee box");
    }
    Ok(())
}

/// Strict insert cascade for a new course. Must run inside the caller's
/// transaction; the first failing statement is returned as-is.
pub fn insert_hierarchy(conn: &Connection, draft: &CourseDraft) -> CourseResult<i64> {
    let course_id = store::insert_course(conn, course_fields(draft))?;
    insert_children(conn, course_id, &draft.tee_boxes)?;
    Ok(course_id)
}

fn replace_hierarchy(conn: &Connection, course_id: i64, draft: &CourseDraft) -> CourseResult<()> {
    if !store::update_course_fields(conn, course_id, course_fields(draft))? {
        return Err(CourseError::NotFound(course_id));
    }
    let old_tee_ids = store::tee_box_ids_for_course(conn, course_id)?;
    for tee_box_id in &old_tee_ids {
        store::delete_holes_for_tee_box(conn, *tee_box_id)?;
    }
    store::delete_tee_boxes_for_course(conn, course_id)?;
    debug!(course_id, removed_tee_boxes = old_tee_ids.len(), "cleared course children");
    insert_children(conn, course_id, &draft.tee_boxes)
}

/// Interactive create/update. The payload must pass [`validate_draft`]; the
/// committed hierarchy is read back and returned.
pub fn write_course(
    conn: &Connection,
    caller: CallerId,
    draft: &CourseDraft,
    mode: WriteMode,
) -> CourseResult<Course> {
    validate_draft(draft)?;
    let course_id = with_transaction(conn, |tx| match mode {
        WriteMode::Create => insert_hierarchy(tx, draft),
        WriteMode::Replace(id) => replace_hierarchy(tx, id, draft).map(|_| id),
    })?;
    info!(
        caller = caller.0,
        course_id,
        ?mode,
        tee_boxes = draft.tee_boxes.len(),
        "course written"
    );
    store::fetch_course(conn, course_id)
}

pub fn set_active(
    conn: &Connection,
    caller: CallerId,
    course_id: i64,
    active: bool,
) -> CourseResult<CourseSummary> {
    let row = store::set_active(conn, course_id, active)?;
    info!(caller = caller.0, course_id, active, "course active flag set");
    Ok(row)
}

/// Flips the active flag; read and write share one transaction.
pub fn toggle_active(
    conn: &Connection,
    caller: CallerId,
    course_id: i64,
) -> CourseResult<CourseSummary> {
    let row = with_transaction(conn, |tx| {
        let current = store::fetch_summary(tx, course_id)?;
        store::set_active(tx, course_id, !current.active)
    })?;
    info!(caller = caller.0, course_id, active = row.active, "course active flag toggled");
    Ok(row)
}
