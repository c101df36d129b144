//! Tracing setup shared by every binary.
//!
//! Each launch logs to stdout and to its own `imgrate_<timestamp>.log` under
//! `.imgrate/logs`; older launch files beyond `KEEP_LOG_FILES` are removed.
//! `RUST_LOG` overrides the default `info` filter.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs;

const KEEP_LOG_FILES: usize = 10;
const LOG_PREFIX: &str = "imgrate_";
const LOG_EXTENSION: &str = ".log";

type Stamp = &'static [BorrowedFormatItem<'static>];
const FILE_STAMP: Stamp = format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: Stamp = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FLUSH_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    #[error("Failed to clean up old logs in {path}: {source}")]
    Prune { path: PathBuf, source: io::Error },
    #[error("Failed to build log file name: {0}")]
    FormatTime(time::error::Format),
    #[error("Failed to create log file {path}: {source}")]
    CreateLogFile { path: PathBuf, source: io::Error },
    #[error("A global tracing subscriber is already installed: {0}")]
    SetGlobal(#[source] tracing_subscriber::util::TryInitError),
}

/// Start logging into the app's `logs` directory and return the file path.
///
/// Only the first successful call installs anything. Callers report errors
/// and keep running without a log file.
pub fn init() -> Result<PathBuf, LoggingError> {
    init_in(&app_dirs::logs_dir()?)
}

/// Like [`init`], with log files placed in `dir`.
pub fn init_in(dir: &Path) -> Result<PathBuf, LoggingError> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let name = log_file_name(OffsetDateTime::now_utc().to_offset(offset))?;
    let path = dir.join(&name);
    if FLUSH_GUARD.get().is_some() {
        return Ok(path);
    }
    let file = fs::File::create(&path).map_err(|source| LoggingError::CreateLogFile {
        path: path.clone(),
        source,
    })?;
    prune_old_logs(dir, KEEP_LOG_FILES)?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let timer = fmt::time::OffsetTime::new(offset, LINE_STAMP);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_timer(timer.clone()))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_timer(timer)
                .with_writer(writer),
        )
        .try_init()
        .map_err(LoggingError::SetGlobal)?;
    let _ = FLUSH_GUARD.set(guard);
    tracing::info!("Logging to {}", path.display());
    Ok(path)
}

/// Delete the oldest launch logs so at most `keep` remain.
///
/// Launch files sort chronologically by name; unrelated files are left alone.
fn prune_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launches: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(prune_err)? {
        let path = entry.map_err(prune_err)?.path();
        let is_launch_log = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_PREFIX) && name.ends_with(LOG_EXTENSION));
        if is_launch_log && path.is_file() {
            launches.push(path);
        }
    }
    if launches.len() <= keep {
        return Ok(());
    }
    launches.sort();
    let stale = launches.len() - keep;
    for path in &launches[..stale] {
        fs::remove_file(path).map_err(prune_err)?;
    }
    Ok(())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = now.format(FILE_STAMP).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_PREFIX}{stamp}{LOG_EXTENSION}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn file_name_embeds_launch_time() {
        let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(log_file_name(at).unwrap(), "imgrate_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_drops_oldest_launches_only() {
        let dir = tempdir().unwrap();
        for day in 1..=12 {
            let name = format!("imgrate_2024-01-{day:02}_00-00-00.log");
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), b"keep").unwrap();
        fs::write(dir.path().join("other.log"), b"keep").unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let names = names_in(dir.path());
        assert_eq!(names.len(), 12);
        assert!(!names.contains(&"imgrate_2024-01-01_00-00-00.log".to_string()));
        assert!(!names.contains(&"imgrate_2024-01-02_00-00-00.log".to_string()));
        assert!(names.contains(&"imgrate_2024-01-12_00-00-00.log".to_string()));
        assert!(names.contains(&"notes.txt".to_string()));
        assert!(names.contains(&"other.log".to_string()));
    }

    #[test]
    fn prune_is_a_no_op_under_the_limit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("imgrate_a.log"), b"").unwrap();
        prune_old_logs(dir.path(), 10).unwrap();
        assert_eq!(names_in(dir.path()), vec!["imgrate_a.log"]);
    }
}
