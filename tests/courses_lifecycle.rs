mod test_support;

use serde_json::json;
use test_support::{error_code, request, request_ok, spawn_sidecar, temp_dir};

fn hole(number: i64, distance: i64, par: i64, hcp: i64) -> serde_json::Value {
    json!({ "number": number, "distance": distance, "par": par, "hcp_index": hcp })
}

#[test]
fn course_create_get_update_toggle_flow() {
    let workspace = temp_dir("coursed-course-lifecycle");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({
            "callerId": 7,
            "course": {
                "name": "Rya GK",
                "location": "Helsingborg",
                "teeBoxes": [
                    { "name": "Yellow", "holes": [hole(2, 150, 3, 11), hole(1, 320, 4, 5)] },
                    { "name": "Red", "holes": [hole(1, 280, 4, 5)] }
                ]
            }
        }),
    );
    let course_id = created["courseId"].as_i64().expect("courseId");
    let course = &created["course"];
    assert_eq!(course["name"], json!("Rya GK"));
    assert_eq!(course["active"], json!(true));
    assert_eq!(course["description"], json!(null));
    assert_eq!(course["teeBoxes"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(course["teeBoxes"][0]["holes"][0]["number"], json!(1));
    assert_eq!(course["teeBoxes"][0]["holes"][0]["hcpIndex"], json!(5));

    let fetched = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.get",
        json!({ "courseId": course_id }),
    );
    assert_eq!(&fetched["course"], course);

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "courses.update",
        json!({
            "callerId": 7,
            "courseId": course_id,
            "course": {
                "name": "Rya Golfklubb",
                "description": "Links by the sound",
                "teeBoxes": [ { "name": "White", "holes": [hole(1, 350, 4, 3)] } ]
            }
        }),
    );
    assert_eq!(updated["courseId"], json!(course_id));
    let tees = updated["course"]["teeBoxes"].as_array().expect("tees");
    assert_eq!(tees.len(), 1);
    assert_eq!(tees[0]["name"], json!("White"));
    assert_eq!(updated["course"]["location"], json!(null));

    let toggled = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courses.toggleActive",
        json!({ "callerId": 7, "courseId": course_id }),
    );
    assert_eq!(toggled["active"], json!(false));

    let active = request_ok(&mut stdin, &mut reader, "6", "courses.list", json!({}));
    assert_eq!(active["courses"], json!([]));
    let all = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "courses.list",
        json!({ "includeInactive": true }),
    );
    assert_eq!(all["courses"][0]["id"], json!(course_id));
    assert_eq!(all["courses"][0]["active"], json!(false));

    let set = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "courses.setActive",
        json!({ "callerId": 7, "courseId": course_id, "active": true }),
    );
    assert_eq!(set["active"], json!(true));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn course_write_errors_leave_store_untouched() {
    let workspace = temp_dir("coursed-course-errors");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let valid = json!({
        "name": "Keep",
        "teeBoxes": [ { "name": "Blue", "holes": [hole(1, 300, 4, 1)] } ]
    });

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({ "course": valid }),
    );
    assert_eq!(error_code(&resp), "bad_params");

    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "courses.create",
        json!({
            "callerId": 1,
            "course": { "name": "Broken", "teeBoxes": [ { "name": "Blue", "holes": [hole(1, 0, 4, 1)] } ] }
        }),
    );
    assert_eq!(error_code(&resp), "bad_params");

    let resp = request(
        &mut stdin,
        &mut reader,
        "3b",
        "courses.create",
        json!({
            "callerId": 1,
            "course": { "name": "Positional", "teeBoxes": [ ["Blue", [[1, 300, 4, 1]]] ] }
        }),
    );
    assert_eq!(error_code(&resp), "bad_format");

    let resp = request(
        &mut stdin,
        &mut reader,
        "4",
        "courses.update",
        json!({ "callerId": 1, "courseId": 404, "course": valid }),
    );
    assert_eq!(error_code(&resp), "not_found");
    assert_eq!(resp["error"]["details"]["courseId"], json!(404));

    let resp = request(
        &mut stdin,
        &mut reader,
        "5",
        "courses.get",
        json!({ "courseId": 404 }),
    );
    assert_eq!(error_code(&resp), "not_found");

    let resp = request(
        &mut stdin,
        &mut reader,
        "6",
        "courses.toggleActive",
        json!({ "callerId": 1, "courseId": 404 }),
    );
    assert_eq!(error_code(&resp), "not_found");

    let status = request_ok(&mut stdin, &mut reader, "7", "courses.status", json!({}));
    assert_eq!(status["courseCount"], json!(0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn seed_replaces_everything_with_sample_courses() {
    let workspace = temp_dir("coursed-seed");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({
            "callerId": 3,
            "course": { "name": "Temporary", "teeBoxes": [ { "name": "Blue", "holes": [hole(1, 300, 4, 1)] } ] }
        }),
    );

    let seeded = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.seed",
        json!({ "callerId": 3 }),
    );
    assert_eq!(seeded["message"], json!("Database seeded successfully"));
    let ids = seeded["courseIds"].as_array().expect("ids");
    assert_eq!(ids.len(), 5);

    let listed = request_ok(&mut stdin, &mut reader, "4", "courses.list", json!({}));
    let names: Vec<&str> = listed["courses"]
        .as_array()
        .expect("courses")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(!names.contains(&"Temporary"));
    assert!(names.contains(&"Falsterbo GK"));

    let course = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courses.get",
        json!({ "courseId": ids[0] }),
    );
    let tees = course["course"]["teeBoxes"].as_array().expect("tees");
    assert_eq!(tees.len(), 3);
    assert!(tees
        .iter()
        .all(|t| t["holes"].as_array().map(|h| h.len()) == Some(18)));

    drop(stdin);
    let _ = child.wait();
}
