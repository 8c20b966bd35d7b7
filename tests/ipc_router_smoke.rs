mod test_support;

use serde_json::json;
use std::io::Write;
use test_support::{
    error_code, read_response, request, request_ok, spawn_sidecar, spawn_sidecar_with, temp_dir,
};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("coursed-router-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    // Before a workspace is chosen listing is empty and everything else refuses.
    let listed = request_ok(&mut stdin, &mut reader, "2", "courses.list", json!({}));
    assert_eq!(listed["courses"], json!([]));
    let resp = request(&mut stdin, &mut reader, "3", "courses.status", json!({}));
    assert_eq!(error_code(&resp), "no_workspace");
    let resp = request(
        &mut stdin,
        &mut reader,
        "4",
        "import.csv",
        json!({ "callerId": 1, "content": "x" }),
    );
    assert_eq!(error_code(&resp), "no_workspace");

    let ws = workspace.to_string_lossy().to_string();
    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "workspace.select",
        json!({ "path": ws }),
    );
    assert_eq!(
        selected.get("workspacePath").and_then(|v| v.as_str()),
        Some(ws.as_str())
    );
    assert!(workspace.join("courses.sqlite3").is_file());

    let status = request_ok(&mut stdin, &mut reader, "6", "courses.status", json!({}));
    assert_eq!(status["initialized"], json!(true));
    assert_eq!(status["hasCourses"], json!(false));
    assert_eq!(status["courseCount"], json!(0));

    let imported = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "import.json",
        json!({
            "callerId": 1,
            "content": r#"{"name":"Smoke","teeBoxes":[{"name":"Red","holes":[{"number":1,"distance":100,"par":3,"hcp_index":1}]}]}"#
        }),
    );
    assert_eq!(imported["createdCount"], json!(1));

    let resp = request(&mut stdin, &mut reader, "8", "courses.nope", json!({}));
    assert_eq!(error_code(&resp), "not_implemented");

    let resp = request(&mut stdin, &mut reader, "9", "workspace.select", json!({}));
    assert_eq!(error_code(&resp), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn malformed_line_gets_bad_json_and_loop_continues() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let resp = read_response(&mut reader);
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("bad_json"));

    // Blank lines are ignored, the next request still gets its own reply.
    writeln!(stdin).expect("write blank");
    let health = request_ok(&mut stdin, &mut reader, "after", "health", json!({}));
    assert!(health.get("version").is_some());

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn startup_workspace_flag_opens_store() {
    let workspace = temp_dir("coursed-startup-workspace");
    let ws = workspace.to_string_lossy().to_string();
    let (mut child, mut stdin, mut reader) = spawn_sidecar_with(&["--workspace", &ws]);

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["workspacePath"].as_str(), Some(ws.as_str()));
    let status = request_ok(&mut stdin, &mut reader, "2", "courses.status", json!({}));
    assert_eq!(status["courseCount"], json!(0));

    drop(stdin);
    let _ = child.wait();
}
