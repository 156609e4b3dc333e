//! Tracing setup for the terminal client.
//!
//! Logs go to a per-session file under the platform cache directory so they
//! never interleave with the board printed on stdout. Setting
//! `SKIRMISH_LOG_STDERR` adds a stderr layer as well.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the process.
pub fn setup_logging(session_id: &Option<String>) -> Result<WorkerGuard> {
    let session_id = session_id.clone().unwrap_or_else(default_session_id);
    let session_log_dir = session_log_dir(&log_directory(), &session_id)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = std::env::var_os("SKIRMISH_LOG_STDERR").map(|_| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

fn default_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}

/// Creates (if needed) and returns the log directory for one session.
fn session_log_dir(base: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = base.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(dir)
}

/// Platform-specific log directory.
fn log_directory() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Caches/skirmish/logs");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("skirmish/logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".cache/skirmish/logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join("skirmish").join("logs");
        }
    }

    std::env::temp_dir().join("skirmish/logs")
}
