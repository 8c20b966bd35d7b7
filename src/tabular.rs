//! Flat CSV intake: one row per hole, course and tee identity repeated on
//! every row. Rows are validated one at a time and grouped by
//! (course name, tee name) into nested candidates.

use crate::error::{CourseError, CourseResult};
use crate::model::{CourseDraft, HoleDraft, TeeBoxDraft};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::debug;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "course_name",
    "tee_name",
    "hole_number",
    "distance",
    "par",
    "hcp_index",
];

/// Header token → column index, resolved once per import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    course_name: usize,
    tee_name: usize,
    hole_number: usize,
    distance: usize,
    par: usize,
    hcp_index: usize,
    location: Option<usize>,
    description: Option<usize>,
}

impl ColumnMap {
    /// Fails on the first required token the header lacks. Names are exact and
    /// case-sensitive; a repeated name resolves to its last position.
    pub fn from_header(header: &StringRecord) -> CourseResult<Self> {
        let mut idx: HashMap<&str, usize> = HashMap::new();
        for (i, col) in header.iter().enumerate() {
            idx.insert(col, i);
        }
        let required = |name: &str| -> CourseResult<usize> {
            idx.get(name).copied().ok_or_else(|| {
                CourseError::format("csv", format!("missing required column: {name}"))
            })
        };
        Ok(Self {
            course_name: required("course_name")?,
            tee_name: required("tee_name")?,
            hole_number: required("hole_number")?,
            distance: required("distance")?,
            par: required("par")?,
            hcp_index: required("hcp_index")?,
            location: idx.get("location").copied(),
            description: idx.get("description").copied(),
        })
    }

    fn hole(&self, row: &StringRecord) -> Option<HoleDraft> {
        Some(HoleDraft {
            number: positive(row.get(self.hole_number)?)?,
            distance: positive(row.get(self.distance)?)?,
            par: positive(row.get(self.par)?)?,
            hcp_index: positive(row.get(self.hcp_index)?)?,
        })
    }
}

fn positive(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|v| *v >= 1)
}

fn optional_cell(row: Option<&StringRecord>, idx: Option<usize>) -> Option<String> {
    let cell = row?.get(idx?)?;
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Reads the whole payload into records. Any CSV syntax error, or fewer than
/// a header plus one data row, is a format error.
pub fn read_records(bytes: &[u8]) -> CourseResult<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CourseError::format("csv", e.to_string()))?;
    if records.len() < 2 {
        return Err(CourseError::format(
            "csv",
            "CSV file must have a header row and at least one data row",
        ));
    }
    Ok(records)
}

/// Groups valid rows into course candidates.
///
/// Location and description come from the first data row and are copied onto
/// every candidate, whichever course that row named. Candidates come out in
/// hash order.
pub fn normalize_csv(bytes: &[u8]) -> CourseResult<Vec<CourseDraft>> {
    let records = read_records(bytes)?;
    let (header, data) = records.split_at(1);
    let header = &header[0];
    let columns = ColumnMap::from_header(header)?;

    let mut grouped: HashMap<String, HashMap<String, Vec<HoleDraft>>> = HashMap::new();
    let mut skipped = 0usize;

    for (i, row) in data.iter().enumerate() {
        let line = i + 2;
        if row.len() < header.len() {
            debug!(line, "skipping short csv row");
            skipped += 1;
            continue;
        }
        let course_name = row.get(columns.course_name).unwrap_or("");
        let tee_name = row.get(columns.tee_name).unwrap_or("");
        if course_name.is_empty() || tee_name.is_empty() {
            debug!(line, "skipping csv row without course or tee name");
            skipped += 1;
            continue;
        }
        let Some(hole) = columns.hole(row) else {
            debug!(line, "skipping csv row with non-positive or non-numeric field");
            skipped += 1;
            continue;
        };
        grouped
            .entry(course_name.to_string())
            .or_default()
            .entry(tee_name.to_string())
            .or_default()
            .push(hole);
    }

    let location = optional_cell(data.first(), columns.location);
    let description = optional_cell(data.first(), columns.description);

    let mut candidates = Vec::new();
    for (course_name, tees) in grouped {
        let tee_boxes: Vec<TeeBoxDraft> = tees
            .into_iter()
            .filter(|(_, holes)| !holes.is_empty())
            .map(|(name, holes)| TeeBoxDraft { name, holes })
            .collect();
        if tee_boxes.is_empty() {
            continue;
        }
        candidates.push(CourseDraft {
            name: course_name,
            location: location.clone(),
            description: description.clone(),
            tee_boxes,
        });
    }

    debug!(
        rows = data.len(),
        skipped,
        courses = candidates.len(),
        "normalized csv rows"
    );
    Ok(candidates)
}
