//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "proxyadmin";
const APPLICATION: &str = "proxyadmin";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/proxyadmin` or `~/.config/proxyadmin`
/// - macOS: `~/Library/Application Support/dev.proxyadmin.proxyadmin`
/// - Windows: `C:\Users\<User>\AppData\Roaming\proxyadmin\proxyadmin\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/proxyadmin` or `~/.cache/proxyadmin`
/// - macOS: `~/Library/Caches/dev.proxyadmin.proxyadmin`
/// - Windows: `C:\Users\<User>\AppData\Local\proxyadmin\proxyadmin\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the preferences file.
pub fn preferences_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("preferences.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
const MAX_OLD_LOGS: usize = 25;

const ARCHIVE_STAMP: &str = "%Y%m%d_%H%M%S";

/// Archives the previous run's `latest.log` and prunes old archives.
///
/// Runs before the logger exists, so failures are returned for the caller
/// to report once logging is up.
pub fn rotate_logs() -> io::Result<()> {
    match cache_dir() {
        Some(cache) => rotate_logs_in(&cache),
        None => Ok(()),
    }
}

pub(crate) fn rotate_logs_in(dir: &Path) -> io::Result<()> {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format(ARCHIVE_STAMP);
        fs::rename(&latest, dir.join(format!("{}.log", stamp)))?;
    }

    for stale in stale_logs(dir)? {
        fs::remove_file(stale)?;
    }
    Ok(())
}

/// Archived logs beyond the newest [`MAX_OLD_LOGS`], oldest first.
fn stale_logs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut archived = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path.extension().is_some_and(|ext| ext == "log");
        let is_latest = path.file_name().is_some_and(|name| name == LATEST_LOG);
        if is_log && !is_latest {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
            archived.push((modified, path));
        }
    }

    archived.sort();
    let excess = archived.len().saturating_sub(MAX_OLD_LOGS);
    Ok(archived.into_iter().take(excess).map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_keeps_recent_logs() {
        let dir = std::env::temp_dir().join(format!("proxyadmin-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..(MAX_OLD_LOGS + 3) {
            fs::write(dir.join(format!("old_{:03}.log", i)), "").unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "previous run").unwrap();

        rotate_logs_in(&dir).unwrap();

        let logs = fs::read_dir(&dir).unwrap().count();
        assert!(!dir.join(LATEST_LOG).exists());
        assert_eq!(logs, MAX_OLD_LOGS);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rotate_reports_unreadable_directory() {
        let dir = std::env::temp_dir().join(format!("proxyadmin-missing-{}", std::process::id()));
        assert!(rotate_logs_in(&dir).is_err());
    }
}
