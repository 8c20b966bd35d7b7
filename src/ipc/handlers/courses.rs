use crate::ipc::error::{course_err, err, ok};
use crate::ipc::helpers::{get_bool, get_caller, get_course_id, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::CourseDraft;
use crate::writer::{self, WriteMode};
use crate::{document, seed, store};
use rusqlite::Connection;
use serde_json::json;

fn no_workspace(req: &Request) -> serde_json::Value {
    err(&req.id, "no_workspace", "select a workspace first", None)
}

fn get_draft(params: &serde_json::Value) -> Result<CourseDraft, HandlerErr> {
    let Some(raw) = params.get("course").filter(|v| !v.is_null()) else {
        return Err(HandlerErr::bad_params("missing course"));
    };
    document::draft_from_value(raw.clone()).map_err(|e| HandlerErr {
        code: e.code(),
        message: e.to_string(),
    })
}

fn handle_courses_list(conn: &Connection, req: &Request) -> serde_json::Value {
    let include_inactive = get_bool(&req.params, "includeInactive").unwrap_or(false);
    match store::list_courses(conn, include_inactive) {
        Ok(courses) => ok(&req.id, json!({ "courses": courses })),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_get(conn: &Connection, req: &Request) -> serde_json::Value {
    let course_id = match get_course_id(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match store::fetch_course(conn, course_id) {
        Ok(course) => ok(&req.id, json!({ "course": course })),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_write(conn: &Connection, req: &Request, replace: bool) -> serde_json::Value {
    let caller = match get_caller(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let mode = if replace {
        match get_course_id(&req.params) {
            Ok(id) => WriteMode::Replace(id),
            Err(e) => return e.response(&req.id),
        }
    } else {
        WriteMode::Create
    };
    let draft = match get_draft(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match writer::write_course(conn, caller, &draft, mode) {
        Ok(course) => ok(&req.id, json!({ "courseId": course.id, "course": course })),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_create(conn: &Connection, req: &Request) -> serde_json::Value {
    handle_courses_write(conn, req, false)
}

fn handle_courses_update(conn: &Connection, req: &Request) -> serde_json::Value {
    handle_courses_write(conn, req, true)
}

fn handle_courses_set_active(conn: &Connection, req: &Request) -> serde_json::Value {
    let (caller, course_id) = match (get_caller(&req.params), get_course_id(&req.params)) {
        (Ok(c), Ok(id)) => (c, id),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };
    let Some(active) = get_bool(&req.params, "active") else {
        return err(&req.id, "bad_params", "missing active", None);
    };
    match writer::set_active(conn, caller, course_id, active) {
        Ok(row) => ok(&req.id, json!({ "id": row.id, "active": row.active, "course": row })),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_toggle_active(conn: &Connection, req: &Request) -> serde_json::Value {
    let (caller, course_id) = match (get_caller(&req.params), get_course_id(&req.params)) {
        (Ok(c), Ok(id)) => (c, id),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };
    match writer::toggle_active(conn, caller, course_id) {
        Ok(row) => ok(&req.id, json!({ "id": row.id, "active": row.active })),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_status(conn: &Connection, req: &Request) -> serde_json::Value {
    match store::course_count(conn) {
        Ok(n) => ok(
            &req.id,
            json!({
                "initialized": true,
                "hasCourses": n > 0,
                "courseCount": n
            }),
        ),
        Err(e) => course_err(&req.id, &e),
    }
}

fn handle_courses_seed(conn: &Connection, req: &Request) -> serde_json::Value {
    let caller = match get_caller(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match seed::seed_sample_courses(conn, caller) {
        Ok(ids) => ok(
            &req.id,
            json!({
                "message": "Database seeded successfully",
                "courseIds": ids
            }),
        ),
        Err(e) => course_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handler: fn(&Connection, &Request) -> serde_json::Value = match req.method.as_str() {
        "courses.list" => handle_courses_list,
        "courses.get" => handle_courses_get,
        "courses.create" => handle_courses_create,
        "courses.update" => handle_courses_update,
        "courses.setActive" => handle_courses_set_active,
        "courses.toggleActive" => handle_courses_toggle_active,
        "courses.status" => handle_courses_status,
        "courses.seed" => handle_courses_seed,
        _ => return None,
    };
    let Some(conn) = state.store() else {
        if req.method == "courses.list" {
            return Some(ok(&req.id, json!({ "courses": [] })));
        }
        return Some(no_workspace(req));
    };
    Some(handler(conn, req))
}
