// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use crate::config::{Config, LoggingLevel};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const APP_DIR: &str = "cosmic-ext-storage-monitor";
const DEFAULT_LOG_PREFIX: &str = "cosmic-ext-storage-monitor.log";
const LOG_FILE_ENV: &str = "COSMIC_EXT_STORAGE_MONITOR_LOG_FILE";
const LOG_DIR_ENV: &str = "COSMIC_EXT_STORAGE_MONITOR_LOG_DIR";
const KEEP_DAYS: u64 = 7;

/// Install the global subscriber: stderr always, a daily file when enabled.
///
/// `RUST_LOG` takes precedence over the configured level.
pub(crate) fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.log_level)));

    // stdout carries command output, so logs go to stderr.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if !config.log_to_disk {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return;
    }

    match file_writer() {
        Ok((writer, guard)) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();

            // Keep the background logging worker alive for the duration of the process.
            let _ = LOG_GUARD.set(guard);
        }
        Err(e) => {
            eprintln!("cosmic-ext-storage-monitor: failed to initialize file logging: {e:#}");
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
        }
    }
}

fn default_directives(level: LoggingLevel) -> String {
    let level = level.as_directive();
    format!("warn,cosmic_ext_storage_monitor={level},storage_udisks={level}")
}

fn file_writer() -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let (dir, prefix) = resolve_log_location();

    if let Err(e) = fs::create_dir_all(&dir) {
        return Err(anyhow::anyhow!(
            "create log directory failed: {} ({})",
            dir.display(),
            e
        ));
    }

    cleanup_old_logs(&dir, &prefix);

    let appender = tracing_appender::rolling::daily(&dir, &prefix);
    Ok(tracing_appender::non_blocking(appender))
}

fn resolve_log_location() -> (PathBuf, OsString) {
    if let Some(file) = std::env::var_os(LOG_FILE_ENV) {
        return split_log_file(Path::new(&file));
    }

    if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
        return (PathBuf::from(dir), OsString::from(DEFAULT_LOG_PREFIX));
    }

    (default_log_dir(), OsString::from(DEFAULT_LOG_PREFIX))
}

fn split_log_file(path: &Path) -> (PathBuf, OsString) {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_dir);
    let prefix = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_LOG_PREFIX));
    (dir, prefix)
}

fn default_log_dir() -> PathBuf {
    if let Some(xdg_state) = std::env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(xdg_state).join(APP_DIR).join("logs");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join(APP_DIR)
            .join("logs");
    }

    PathBuf::from("/tmp").join(APP_DIR).join("logs")
}

fn cleanup_old_logs(dir: &Path, prefix: &OsString) {
    let cutoff = SystemTime::now().checked_sub(Duration::from_secs(KEEP_DAYS * 24 * 60 * 60));
    let Some(cutoff) = cutoff else { return };

    let prefix = prefix.to_string_lossy();

    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        // Only touch files created by our rolling appender.
        if !entry
            .file_name()
            .to_string_lossy()
            .starts_with(prefix.as_ref())
        {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if modified >= cutoff {
            continue;
        }

        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_follow_level() {
        assert_eq!(
            default_directives(LoggingLevel::Debug),
            "warn,cosmic_ext_storage_monitor=debug,storage_udisks=debug"
        );
        assert!(EnvFilter::try_new(default_directives(LoggingLevel::Info)).is_ok());
    }

    #[test]
    fn log_file_is_split_into_dir_and_prefix() {
        let (dir, prefix) = split_log_file(Path::new("/var/log/monitor/registry.log"));
        assert_eq!(dir, PathBuf::from("/var/log/monitor"));
        assert_eq!(prefix, OsString::from("registry.log"));
    }

    #[test]
    fn bare_log_file_name_uses_default_dir() {
        let (dir, prefix) = split_log_file(Path::new("registry.log"));
        assert_eq!(dir, default_log_dir());
        assert_eq!(prefix, OsString::from("registry.log"));
    }
}
