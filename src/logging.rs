//! Logger setup for the terminal binary.
//!
//! The game owns the terminal in raw mode on the alternate screen, so log
//! lines on that same terminal would paint over the board. Logs go to a file
//! when one is configured, to stderr when stderr is redirected, and nowhere
//! otherwise.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Where log records end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

pub fn choose_target(log_file: Option<&Path>, stderr_is_terminal: bool) -> LogTarget {
    match log_file {
        Some(path) => LogTarget::File(path.to_path_buf()),
        None if stderr_is_terminal => LogTarget::Disabled,
        None => LogTarget::Stderr,
    }
}

/// Install the global logger. `RUST_LOG` picks the filter (default `warn`).
pub fn init(log_file: Option<&Path>) -> Result<LogTarget> {
    let target = choose_target(log_file, io::stderr().is_terminal());
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match &target {
        LogTarget::Disabled => return Ok(target),
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }
    builder.init();
    Ok(target)
}
