use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE_NAME: &str = "pantry.log";

/// Filter directive used when `RUST_LOG` is not set.
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("pantry={}", level)
}

/// Split a log file path into the directory the daily appender writes to and
/// the file name prefix it rotates under.
fn appender_target(log_path: &Path) -> (PathBuf, OsString) {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from(DEFAULT_LOG_FILE_NAME));
    (dir, file_name)
}

/// Initialize the logging system
///
/// Logs go to stderr in compact form. With `log_file`, structured JSON logs
/// are additionally written to a daily-rotated file. Calling this twice is a
/// no-op for the second call.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let result = match log_file {
        Some(log_path) => {
            let (dir, file_name) = appender_target(&log_path);
            let _ = std::fs::create_dir_all(&dir);
            let file_layer = fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, file_name))
                .with_ansi(false)
                .json();
            registry.with(file_layer).try_init()
        }
        None => registry.try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}
