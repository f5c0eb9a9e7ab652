//! Logging bootstrap for the API server and its integration tests.
//!
//! Events go to a daily rolling file and, optionally, to stderr, both in the
//! same encoding. [`init_logging`] installs the global subscriber once; later
//! calls only return the path of today's log file.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const LOG_DIR_ENV: &str = "ISG_LOG_DIR";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for defaults and file names).
    pub app_name: String,
    /// Optional explicit directory for log output. If `None`, we consult
    /// `ISG_LOG_DIR` and finally fall back to `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    /// Preferred log encoding.
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "isg-api".to_string(),
            log_dir: None,
            emit_stderr: true,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the concrete log file path for the current day. Subsequent calls
/// are cheap and simply hand back the originally resolved location.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let resolved_dir = resolve_log_dir(&config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&resolved_dir)
        .with_context(|| format!("failed to create log directory: {}", resolved_dir.display()))?;

    let log_filename = format!("{}.log", config.app_name);
    let today = Local::now().format("%Y-%m-%d").to_string();
    let full_path = resolved_dir.join(format!("{log_filename}.{today}"));

    let appender = rolling::daily(&resolved_dir, &log_filename);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let mut sinks: Vec<BoxedLayer> = vec![file_layer(config.format, writer)];
    if config.emit_stderr {
        sinks.push(stderr_layer(config.format));
    }

    tracing_subscriber::registry()
        .with(sinks)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn file_layer(format: LogFormat, writer: NonBlocking) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    }
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var(LOG_DIR_ENV) {
        return expand_home(Path::new(&env_dir));
    }

    default_data_dir(app_name)
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn default_data_dir(app_name: &str) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name)
    } else {
        PathBuf::from(".").join(app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let tmp = tempfile::TempDir::new().unwrap();
        let resolved = resolve_log_dir("isg-api", Some(tmp.path()));
        assert_eq!(resolved, tmp.path());
    }

    #[test]
    fn absolute_paths_are_not_expanded() {
        assert_eq!(
            expand_home(Path::new("/var/log/isg")),
            PathBuf::from("/var/log/isg")
        );
    }

    #[test]
    fn one_sink_per_destination_in_the_chosen_encoding() {
        for format in [LogFormat::Text, LogFormat::Json] {
            let (writer, _guard) = tracing_appender::non_blocking(std::io::sink());
            let sinks = vec![file_layer(format, writer), stderr_layer(format)];
            let subscriber = tracing_subscriber::registry().with(sinks);
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(?format, "sink.check");
            });
        }
    }

    #[test]
    fn log_format_parses_lowercase() {
        let fmt: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(fmt, LogFormat::Json);
    }
}
