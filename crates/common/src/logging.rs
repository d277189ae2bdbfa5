//! Logging and tracing initialization.

use std::fs::File;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// When [`LoggingConfig::file`] is set, output goes to that file
/// (ANSI escapes disabled, appended across runs) through a non-blocking
/// writer. The returned guard flushes buffered log lines on drop; keep
/// it alive for the program's duration. A file that cannot be opened
/// falls back to the terminal rather than silencing the session.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            if config.json {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .json()
                    .with_writer(writer)
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            } else {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer)
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            }
            Some(guard)
        }
        None => {
            if config.json {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .json()
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            } else {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            }
            None
        }
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() -> Option<WorkerGuard> {
    init_logging(&LoggingConfig::default())
}

/// Open the log file for appending, creating parent directories as
/// needed. Returns `None` (with a note on stderr) if the path cannot be
/// opened.
fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Cannot create log directory {}: {e}", parent.display());
                return None;
            }
        }
    }
    match File::options().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("palmwarp-logging-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_open_log_file_creates_file_and_parents() {
        let dir = scratch_path("nested");
        let path = dir.join("deeper").join("session.log");
        let file = open_log_file(&path);
        assert!(file.is_some());
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_open_log_file_appends_across_opens() {
        use std::io::Write;

        let path = scratch_path("append.log");
        std::fs::remove_file(&path).ok();

        let mut first = open_log_file(&path).unwrap();
        write!(first, "one").unwrap();
        drop(first);

        let mut second = open_log_file(&path).unwrap();
        write!(second, "two").unwrap();
        drop(second);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "onetwo");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unopenable_log_path_is_reported_not_fatal() {
        // A directory cannot be opened as a file.
        let dir = scratch_path("as-dir");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(open_log_file(&dir).is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
