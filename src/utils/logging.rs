use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Where log lines end up. stdout is never an option: it carries the MCP
/// protocol when serving.
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    File(std::path::PathBuf),
    Stderr,
    /// Only errors, on stderr
    Quiet,
}

impl LogTarget {
    pub fn select(verbose: bool, log: &LogConfig) -> Self {
        if let Some(ref file) = log.file {
            LogTarget::File(file.clone())
        } else if verbose || log.dev_mode {
            LogTarget::Stderr
        } else {
            LogTarget::Quiet
        }
    }
}

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" | "critical" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn init_logging(verbose: bool, log: &LogConfig) -> Result<()> {
    let target = LogTarget::select(verbose, log);

    let level = match target {
        LogTarget::Quiet => Level::ERROR,
        _ if verbose => Level::DEBUG,
        _ => parse_level(&log.level),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        // Filter out noisy dependencies (these parse strings are static and known-valid)
        .add_directive("reqwest=warn".parse().expect("valid directive for reqwest"))
        .add_directive("hyper=warn".parse().expect("valid directive for hyper"))
        .add_directive("rmcp=warn".parse().expect("valid directive for rmcp"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        LogTarget::Stderr | LogTarget::Quiet => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
