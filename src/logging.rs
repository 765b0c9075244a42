use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "overhead.log";

/// Daily rolling file log. Nothing goes to stdout or stderr while the UI owns
/// the terminal.
pub fn initialize_logging() -> WorkerGuard {
    let (writer, problems) = open_log_writer(Path::new(LOG_DIR), &fallback_dir());
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    // only reportable once the subscriber exists
    for problem in &problems {
        tracing::warn!("{}", problem);
    }
    tracing::info!("Logging initialized successfully.");
    guard
}

fn fallback_dir() -> PathBuf {
    std::env::temp_dir().join("overhead-tui").join(LOG_DIR)
}

fn open_appender(dir: &Path) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE)
        .build(dir)
}

/// Tries `dir`, then `fallback`, then discards output. The returned messages
/// describe every directory that could not be used.
fn open_log_writer(dir: &Path, fallback: &Path) -> (Box<dyn Write + Send>, Vec<String>) {
    let mut problems = Vec::new();
    for candidate in [dir, fallback] {
        match open_appender(candidate) {
            Ok(appender) => {
                if !problems.is_empty() {
                    problems.push(format!("Logging to '{}' instead", candidate.display()));
                }
                return (Box::new(appender), problems);
            }
            Err(e) => problems.push(format!(
                "Could not open log directory '{}': {}",
                candidate.display(),
                e
            )),
        }
    }
    (Box::new(std::io::sink()), problems)
}
