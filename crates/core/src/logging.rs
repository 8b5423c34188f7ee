use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directives read before `RUST_LOG`.
pub const LOG_ENV: &str = "JAVAMAP_LOG";

/// Our crates log at `info`, dependencies only warn.
const DEFAULT_DIRECTIVES: &str = "warn,javamap_core=info,javamap_java=info,javamap_cli=info";

/// `~/.javamap/logs`, or `./.javamap/logs` without a home directory.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".javamap")
        .join("logs")
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber: a daily file named after `component`,
/// plus stderr when `to_stderr` is set. Records are flushed until the guard drops.
///
/// A second call keeps the subscriber already installed.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    let (writer, guard) = match std::fs::create_dir_all(&dir) {
        Ok(()) => tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, component)),
        Err(_) => tracing_appender::non_blocking(std::io::sink()),
    };

    let file = fmt::layer().with_writer(writer).with_ansi(false);
    let stderr = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(file)
        .with(stderr)
        .try_init();
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_live_under_the_javamap_home() {
        assert!(log_dir().ends_with(".javamap/logs"));
    }

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}
