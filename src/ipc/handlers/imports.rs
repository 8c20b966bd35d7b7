use crate::error::CourseResult;
use crate::import::{self, ImportReport};
use crate::ipc::error::{course_err, err, ok};
use crate::ipc::helpers::{get_caller, read_payload};
use crate::ipc::types::{AppState, Request};
use crate::model::CallerId;
use rusqlite::Connection;
use serde_json::json;

type ImportFn = fn(&Connection, CallerId, &[u8]) -> CourseResult<ImportReport>;

fn handle_import(state: &mut AppState, req: &Request, run: ImportFn) -> serde_json::Value {
    let Some(conn) = state.store() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let caller = match get_caller(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let bytes = match read_payload(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    match run(conn, caller, &bytes) {
        Ok(report) => ok(
            &req.id,
            json!({
                "message": report.message(),
                "createdCount": report.created_count,
                "courseIds": report.course_ids,
            }),
        ),
        Err(e) => course_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "import.json" => Some(handle_import(state, req, import::import_json)),
        "import.csv" => Some(handle_import(state, req, import::import_csv)),
        _ => None,
    }
}
