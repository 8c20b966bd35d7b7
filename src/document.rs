//! Nested-document intake: JSON payloads that already carry the
//! course → tee box → hole shape.

use crate::error::{CourseError, CourseResult};
use crate::model::CourseDraft;
use serde_json::Value;

/// Accepts either an array of courses or a single course object. A null array
/// element reads as an empty candidate; any other non-object is a format error.
pub fn parse_document(bytes: &[u8]) -> CourseResult<Vec<CourseDraft>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| CourseError::format("json", format!("not valid JSON ({e})")))?;
    let items = match value {
        Value::Array(items) => items,
        one @ Value::Object(_) => vec![one],
        _ => {
            return Err(CourseError::format(
                "json",
                "expected a course object or an array of courses",
            ))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            draft_from_value(item).map_err(|e| match e {
                CourseError::Format { message, .. } => {
                    CourseError::format("json", format!("course {}: {message}", i + 1))
                }
                other => other,
            })
        })
        .collect()
}

/// Decodes one course. Courses, tee boxes and holes must be JSON objects (or
/// null); positional arrays are rejected.
pub fn draft_from_value(value: Value) -> CourseResult<CourseDraft> {
    if value.is_null() {
        return Ok(CourseDraft::default());
    }
    require_record(&value, "course")?;
    for tee in nested(&value, &["teeBoxes", "tee_boxes"]) {
        require_record(tee, "tee box")?;
        for hole in nested(tee, &["holes"]) {
            require_record(hole, "hole")?;
        }
    }
    serde_json::from_value(value).map_err(|e| CourseError::format("json", e.to_string()))
}

fn require_record(value: &Value, what: &str) -> CourseResult<()> {
    if value.is_object() || value.is_null() {
        Ok(())
    } else {
        Err(CourseError::format("json", format!("{what} must be an object")))
    }
}

fn nested<'a>(value: &'a Value, keys: &'a [&'a str]) -> impl Iterator<Item = &'a Value> + 'a {
    keys.iter()
        .filter_map(move |k| value.get(*k))
        .filter_map(Value::as_array)
        .flatten()
}

/// Full precondition check for the interactive create/update path.
pub fn validate_draft(draft: &CourseDraft) -> CourseResult<()> {
    if draft.name.trim().is_empty() {
        return Err(CourseError::validation("course name must not be empty"));
    }
    if draft.tee_boxes.is_empty() {
        return Err(CourseError::validation("course must have at least one tee box"));
    }
    for (ti, tee) in draft.tee_boxes.iter().enumerate() {
        if tee.name.trim().is_empty() {
            return Err(CourseError::validation(format!(
                "tee box {} name must not be empty",
                ti + 1
            )));
        }
        if tee.holes.is_empty() {
            return Err(CourseError::validation(format!(
                "tee box '{}' must have at least one hole",
                tee.name
            )));
        }
        if let Some(bad) = tee.holes.iter().find(|h| !h.is_positive()) {
            return Err(CourseError::validation(format!(
                "tee box '{}' hole {}: number, distance, par and hcp_index must be positive",
                tee.name, bad.number
            )));
        }
    }
    Ok(())
}

/// Course-level gate for bulk import. Tee boxes and holes are filtered later,
/// one at a time, while inserting.
pub fn is_bulk_candidate(draft: &CourseDraft) -> bool {
    !draft.name.is_empty() && !draft.tee_boxes.is_empty()
}
