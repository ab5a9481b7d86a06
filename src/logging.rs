//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events; applications that do not
//! install their own subscriber can call [`init`].

use std::env;
use std::sync::OnceLock;

use crate::config::LoggingConfig;

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "TIMESTREAM_LOG";

static TRACE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install a global subscriber built from `config`.
///
/// Returns `false` when a global subscriber was already installed or the log
/// file could not be opened.
pub fn init(config: &LoggingConfig) -> bool {
    let level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| config.level.clone());
    let filter = tracing_subscriber::EnvFilter::try_new(&level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = config.format.eq_ignore_ascii_case("json");

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = match &config.file {
        Some(path) => {
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("ERROR: Unable to open log file '{}': {e}", path.display());
                    return false;
                }
            };
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let _ = TRACE_GUARD.set(guard);

            let base = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(non_blocking);
            if json {
                Box::new(base.json().finish())
            } else {
                Box::new(base.compact().finish())
            }
        }
        None => {
            let base = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            if json {
                Box::new(base.json().finish())
            } else {
                Box::new(base.compact().finish())
            }
        }
    };

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("bridge.log")),
            ..LoggingConfig::default()
        };
        let first = init(&config);
        let second = init(&config);
        // At most one global subscriber can win
        assert!(!(first && second));
        assert!(dir.path().join("bridge.log").exists());
    }
}
