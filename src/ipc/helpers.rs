use crate::ipc::error::err;
use crate::model::CallerId;
use anyhow::Context;
use serde_json::Value;
use std::path::PathBuf;

/// Param failure already shaped as an IPC error response.
pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
        }
    }

    pub fn response(self, id: &str) -> Value {
        err(id, self.code, self.message, None)
    }
}

pub fn get_required_i64(params: &Value, key: &str) -> Result<i64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_course_id(params: &Value) -> Result<i64, HandlerErr> {
    get_required_i64(params, "courseId")
}

pub fn get_caller(params: &Value) -> Result<CallerId, HandlerErr> {
    let id = get_required_i64(params, "callerId")?;
    if id < 1 {
        return Err(HandlerErr::bad_params("callerId must be positive"));
    }
    Ok(CallerId(id))
}

pub fn get_bool(params: &Value, key: &str) -> Option<bool> {
    params.get(key).and_then(|v| v.as_bool())
}

/// Import payload: inline `content` wins over `path`. The whole file is read
/// before anything is written.
pub fn read_payload(params: &Value) -> Result<Vec<u8>, HandlerErr> {
    if let Some(content) = params.get("content").and_then(|v| v.as_str()) {
        return Ok(content.as_bytes().to_vec());
    }
    let Some(path) = params.get("path").and_then(|v| v.as_str()).map(PathBuf::from) else {
        return Err(HandlerErr::bad_params("missing content or path"));
    };
    read_file(&path).map_err(|e| HandlerErr {
        code: "io_failed",
        message: format!("{e:#}"),
    })
}

fn read_file(path: &std::path::Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.to_string_lossy()))
}
