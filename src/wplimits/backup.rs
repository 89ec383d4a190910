//! Timestamped backups of wp-config.php and their retention.
//!
//! Backups live next to the original as `wp-config.php.backup-<timestamp>`.
//! After a committed edit, retention trims the set to the five most recent;
//! a rollback deletes the backup it restored from.

use crate::error::{Result, WplimitsError};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// How many backups retention keeps for one config file.
pub const RETAIN_COUNT: usize = 5;

const BACKUP_MARKER: &str = ".backup-";

/// `wp-config.php` → `wp-config.php.backup-2026-08-30-141503` (UTC).
pub fn backup_path_for(config_path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y-%m-%d-%H%M%S");
    let mut name = config_path.as_os_str().to_os_string();
    name.push(format!("{BACKUP_MARKER}{stamp}"));
    PathBuf::from(name)
}

/// Copy the config file to a fresh timestamped backup. Nothing may be
/// written to the original past a failure here.
pub fn create_backup(config_path: &Path) -> Result<PathBuf> {
    let backup = backup_path_for(config_path);
    fs::copy(config_path, &backup).map_err(WplimitsError::BackupFailed)?;
    Ok(backup)
}

/// All backups of `config_path` in its directory, unordered.
pub fn list_backups(config_path: &Path) -> Result<Vec<PathBuf>> {
    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let Some(original_name) = config_path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{original_name}{BACKUP_MARKER}");

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(&prefix) {
                backups.push(entry.path());
            }
        }
    }
    Ok(backups)
}

/// Trim backups of `config_path` to the [`RETAIN_COUNT`] most recently
/// modified. Errors are swallowed: retention is housekeeping and must never
/// fail the edit that triggered it.
pub fn cleanup_old_backups(config_path: &Path) {
    let Ok(mut backups) = list_backups(config_path) else {
        return;
    };
    if backups.len() <= RETAIN_COUNT {
        return;
    }

    // Newest first. The filename timestamp breaks mtime ties, which matters
    // on filesystems with coarse mtime resolution.
    backups.sort_by_key(|path| (std::cmp::Reverse(mtime_of(path)), std::cmp::Reverse(path.clone())));

    for stale in &backups[RETAIN_COUNT..] {
        let _ = fs::remove_file(stale);
    }
}

fn mtime_of(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
