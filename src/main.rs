mod config;
mod db;
mod document;
mod error;
mod import;
mod ipc;
mod model;
mod seed;
mod store;
mod tabular;
mod writer;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();

    // stdout carries responses; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(io::stderr)
        .init();
    info!("starting coursed v{}", env!("CARGO_PKG_VERSION"));

    let mut state = ipc::AppState::new();
    if let Some(path) = args.workspace.clone() {
        if let Err(e) = ipc::open_workspace(&mut state, path) {
            error!(error = %format!("{e:#}"), "failed to open startup workspace");
            return Err(e);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let body = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", body);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    info!("stdin closed, exiting");
    Ok(())
}
