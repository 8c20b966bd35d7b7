//! Bulk import of course hierarchies from JSON documents or flat CSV.
//!
//! The payload is parsed and normalized completely before the store is
//! touched; a format problem fails the call with nothing written. The insert
//! pass is lenient and runs inside a single transaction:
//!
//! - a course without a name or without tee boxes is skipped,
//! - a tee box without a name or without holes is skipped,
//! - a hole with a non-positive field is skipped,
//! - a statement the store rejects on a constraint skips that row (and its
//!   subtree) only.
//!
//! Any other store failure rolls back the whole import, including rows that
//! had already been written.
//!
//! The two sources filter at different levels. CSV rows are dropped before
//! grouping, so a course whose rows are all bad never becomes a candidate.
//! A JSON course is gated on its own name and tee box count only, so it is
//! still created when every one of its tee boxes is later skipped.

use crate::document;
use crate::error::CourseResult;
use crate::model::{CallerId, CourseDraft};
use crate::store;
use crate::tabular;
use crate::writer::{course_fields, with_transaction};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub created_count: usize,
    pub course_ids: Vec<i64>,
}

impl ImportReport {
    pub fn message(&self) -> String {
        format!("Successfully added {} courses", self.created_count)
    }
}

pub fn import_json(
    conn: &Connection,
    caller: CallerId,
    bytes: &[u8],
) -> CourseResult<ImportReport> {
    run_import(conn, caller, ImportFormat::Json, bytes)
}

pub fn import_csv(conn: &Connection, caller: CallerId, bytes: &[u8]) -> CourseResult<ImportReport> {
    run_import(conn, caller, ImportFormat::Csv, bytes)
}

fn run_import(
    conn: &Connection,
    caller: CallerId,
    format: ImportFormat,
    bytes: &[u8],
) -> CourseResult<ImportReport> {
    let candidates = match format {
        ImportFormat::Json => document::parse_document(bytes)?,
        ImportFormat::Csv => tabular::normalize_csv(bytes)?,
    };
    let total = candidates.len();

    let course_ids = with_transaction(conn, |tx| {
        let mut ids = Vec::new();
        for (i, candidate) in candidates.iter().enumerate() {
            if !document::is_bulk_candidate(candidate) {
                warn!(candidate = i, "skipping course without name or tee boxes");
                continue;
            }
            if let Some(id) = insert_lenient(tx, candidate)? {
                ids.push(id);
            }
        }
        Ok(ids)
    })?;

    info!(
        caller = caller.0,
        format = format.as_str(),
        candidates = total,
        created = course_ids.len(),
        "import committed"
    );
    Ok(ImportReport {
        created_count: course_ids.len(),
        course_ids,
    })
}

/// Row-level store rejections become `None`; anything else propagates.
fn skip_rejected<T>(res: CourseResult<T>, what: &'static str) -> CourseResult<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_row_rejection() => {
            warn!(error = %e, "{what} rejected by store, skipped");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn insert_lenient(conn: &Connection, draft: &CourseDraft) -> CourseResult<Option<i64>> {
    let Some(course_id) = skip_rejected(store::insert_course(conn, course_fields(draft)), "course")?
    else {
        return Ok(None);
    };

    for tee in &draft.tee_boxes {
        if tee.name.is_empty() || tee.holes.is_empty() {
            warn!(course_id, tee = %tee.name, "skipping tee box without name or holes");
            continue;
        }
        let Some(tee_box_id) =
            skip_rejected(store::insert_tee_box(conn, course_id, &tee.name), "tee box")?
        else {
            continue;
        };
        for hole in &tee.holes {
            if !hole.is_positive() {
                debug!(tee_box_id, number = hole.number, "skipping hole with non-positive field");
                continue;
            }
            skip_rejected(store::insert_hole(conn, tee_box_id, hole), "hole")?;
        }
    }
    Ok(Some(course_id))
}
