use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

/// One stdin line: `{"id", "method", "params"}`.
#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Process-wide state. The course store is only open once a workspace has
/// been selected.
#[derive(Default)]
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open course store, if any.
    pub fn store(&self) -> Option<&Connection> {
        self.db.as_ref()
    }

    pub fn attach(&mut self, workspace: PathBuf, conn: Connection) {
        self.workspace = Some(workspace);
        self.db = Some(conn);
    }

    pub fn workspace_path(&self) -> Option<String> {
        self.workspace
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }
}
