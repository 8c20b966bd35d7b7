use crate::error::CourseResult;
use crate::model::{CallerId, CourseDraft, HoleDraft, TeeBoxDraft};
use crate::store;
use crate::writer::{insert_hierarchy, with_transaction};
use rusqlite::Connection;
use tracing::info;

const SAMPLE_COURSES: [(&str, &str, &str); 5] = [
    ("Bro Hof Slott GC", "Stockholm, Sweden", "Championship level course"),
    ("Ullna Golf Club", "Stockholm, Sweden", "Beautiful lakeside course"),
    ("Halmstad GK (North)", "Halmstad, Sweden", "Classic Swedish course"),
    ("Falsterbo GK", "Falsterbo, Sweden", "Stunning coastal links"),
    ("Barsebäck Golf & CC", "Barsebäck, Sweden", "Former European Tour venue"),
];

const SAMPLE_TEES: [&str; 3] = ["Championship", "Club", "Forward"];

fn sample_holes(tee_idx: i64) -> Vec<HoleDraft> {
    let base = 165 - tee_idx * 15;
    let step = 15 - tee_idx * 2;
    (1..=18)
        .map(|number| HoleDraft {
            number,
            distance: base + (number - 1) * step,
            par: match number % 4 {
                0 => 5,
                2 => 3,
                _ => 4,
            },
            hcp_index: (number * 7) % 18 + 1,
        })
        .collect()
}

pub fn sample_drafts() -> Vec<CourseDraft> {
    SAMPLE_COURSES
        .iter()
        .map(|(name, location, description)| CourseDraft {
            name: (*name).to_string(),
            location: Some((*location).to_string()),
            description: Some((*description).to_string()),
            tee_boxes: SAMPLE_TEES
                .iter()
                .zip(0i64..)
                .map(|(tee, idx)| TeeBoxDraft {
                    name: (*tee).to_string(),
                    holes: sample_holes(idx),
                })
                .collect(),
        })
        .collect()
}

/// Wipes every course and loads the sample set, all in one transaction.
pub fn seed_sample_courses(conn: &Connection, caller: CallerId) -> CourseResult<Vec<i64>> {
    let drafts = sample_drafts();
    let ids = with_transaction(conn, |tx| {
        store::clear_all(tx)?;
        drafts
            .iter()
            .map(|d| insert_hierarchy(tx, d))
            .collect::<CourseResult<Vec<_>>>()
    })?;
    info!(caller = caller.0, courses = ids.len(), "database seeded");
    Ok(ids)
}
