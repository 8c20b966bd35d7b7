use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "coursed=info";

#[derive(Parser, Debug)]
#[command(name = "coursed")]
#[command(about = "Golf course hierarchy sidecar (JSON lines over stdin/stdout)")]
#[command(version)]
pub struct Args {
    /// Workspace folder to open at startup (same as a `workspace.select` request)
    #[arg(short, long, env = "COURSED_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Tracing filter directive; RUST_LOG is used when this is unset
    #[arg(long, env = "COURSED_LOG")]
    pub log: Option<String>,
}

impl Args {
    pub fn log_filter(&self) -> tracing_subscriber::EnvFilter {
        match &self.log {
            Some(directive) => tracing_subscriber::EnvFilter::new(directive),
            None => tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        }
    }
}
