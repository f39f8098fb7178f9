//! Tracing setup for the client binaries.
//!
//! Logs always go to stderr so stdout stays free for the match summary. With
//! `--log-dir` a daily rolling file is written as well. `RUST_LOG` overrides
//! the default `info` filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Open the rolling log file for `prefix` under `dir`, creating `dir` if needed.
pub fn file_writer(
    dir: &Path,
    prefix: &str,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.display().to_string(),
        source,
    })?;
    let appender = tracing_appender::rolling::daily(dir, prefix);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init(log_dir: Option<&Path>, prefix: &str) -> Result<Option<WorkerGuard>, LoggingError> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match log_dir {
        Some(dir) => {
            let (writer, guard) = file_writer(dir, prefix)?;
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
                .with(env_filter())
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(env_filter())
                .try_init()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_file_writer_creates_nested_directory() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("logs").join("arena");

        let (mut writer, guard) = file_writer(&dir, "unary-client").unwrap();
        writer.write_all(b"round 1\n").unwrap();
        drop(guard);

        assert!(dir.is_dir());
        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_file_writer_reports_unusable_directory() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let Err(err) = file_writer(&blocker.join("logs"), "streaming-client") else {
            panic!("log directory under a regular file should not be creatable");
        };
        assert!(matches!(err, LoggingError::CreateDir { .. }));
    }
}
