//! The safe-write controller for wp-config.php.
//!
//! `ConfigHandler` is the only component in the crate that writes to disk.
//! An edit runs backup → write → verify, with rollback when the write itself
//! fails. Verification failure does not roll back: the write succeeded, the
//! file simply did not end up containing what we expected (unusual file
//! structure), and the caller is pointed at manual editing instead.

use crate::error::{Result, WplimitsError};
use crate::memsize::MemorySize;
use crate::{backup, locate, scan, writer};
use crate::{WP_MAX_MEMORY_LIMIT, WP_MEMORY_LIMIT};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Hook run after a committed write, e.g. to invalidate a bytecode cache
/// for the rewritten file. Failures are the hook's own problem; the edit has
/// already committed.
pub type PostCommitHook = Box<dyn Fn(&Path)>;

/// The values a config file currently declares, first occurrence of each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileValues {
    pub memory_limit: Option<String>,
    pub max_memory_limit: Option<String>,
}

pub struct ConfigHandler {
    config_path: PathBuf,
    post_commit: Option<PostCommitHook>,
}

impl ConfigHandler {
    /// Locate wp-config.php under (or beside) `base_dir`.
    pub fn locate(base_dir: &Path) -> Result<Self> {
        let config_path = locate::locate_config(base_dir).ok_or(WplimitsError::ConfigNotFound)?;
        Ok(Self::at_path(config_path))
    }

    /// Use an explicit path, bypassing the locator.
    pub fn at_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            post_commit: None,
        }
    }

    pub fn with_post_commit_hook(mut self, hook: PostCommitHook) -> Self {
        self.post_commit = Some(hook);
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Effective write access, not just permission bits: a root-owned 0644
    /// file is unwritable to an unprivileged process even though no write
    /// bit is missing. The probe open is non-truncating. A set readonly bit
    /// wins regardless, covering privileged processes that can open
    /// anything.
    pub fn is_writable(&self) -> bool {
        let read_only = fs::metadata(&self.config_path)
            .map(|meta| meta.permissions().readonly())
            .unwrap_or(true);
        if read_only {
            return false;
        }
        fs::OpenOptions::new()
            .write(true)
            .open(&self.config_path)
            .is_ok()
    }

    /// Permission bits as an octal string (`"0644"`), for diagnostics.
    #[cfg(unix)]
    pub fn permissions_octal(&self) -> Option<String> {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(&self.config_path)
            .ok()
            .map(|meta| format!("{:04o}", meta.permissions().mode() & 0o7777))
    }

    #[cfg(not(unix))]
    pub fn permissions_octal(&self) -> Option<String> {
        None
    }

    pub fn read_document(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.config_path)?)
    }

    /// What the file declares right now, independent of the live runtime.
    pub fn file_values(&self) -> Result<FileValues> {
        let document = self.read_document()?;
        Ok(FileValues {
            memory_limit: scan::scan(&document, WP_MEMORY_LIMIT).first_value,
            max_memory_limit: scan::scan(&document, WP_MAX_MEMORY_LIMIT).first_value,
        })
    }

    /// Rewrite both managed constants. Returns the path of the backup taken
    /// before the write.
    ///
    /// The write path is strictly ordered: writability precondition, backup,
    /// write, read-back verification. A failed write restores the backup
    /// (best-effort) and deletes it. After a verified write, the post-commit
    /// hook and backup retention run; neither can fail the edit.
    pub fn update_limits(&self, memory: &MemorySize, max: &MemorySize) -> Result<PathBuf> {
        self.update_limits_with(memory, max, |path, content| fs::write(path, content))
    }

    /// Same flow with the disk write injectable, so the rollback and
    /// verification-failure branches can be driven without a failing
    /// filesystem.
    fn update_limits_with(
        &self,
        memory: &MemorySize,
        max: &MemorySize,
        write_fn: impl FnOnce(&Path, &str) -> std::io::Result<()>,
    ) -> Result<PathBuf> {
        if !self.is_writable() {
            return Err(WplimitsError::ConfigNotWritable(self.config_path.clone()));
        }

        let document = self.read_document()?;
        let backup_path = backup::create_backup(&self.config_path)?;

        let updated = writer::upsert(&document, WP_MEMORY_LIMIT, &memory.to_string());
        let updated = writer::upsert(&updated, WP_MAX_MEMORY_LIMIT, &max.to_string());

        if let Err(source) = write_fn(&self.config_path, &updated) {
            let _ = fs::copy(&backup_path, &self.config_path);
            let _ = fs::remove_file(&backup_path);
            return Err(WplimitsError::WriteFailed { source });
        }

        self.verify_write(memory, max)?;

        if let Some(hook) = &self.post_commit {
            hook(&self.config_path);
        }
        backup::cleanup_old_backups(&self.config_path);

        Ok(backup_path)
    }

    /// Re-read the file from disk and confirm both canonical statements made
    /// it in. The file keeps its new content either way; only the write step
    /// rolls back.
    fn verify_write(&self, memory: &MemorySize, max: &MemorySize) -> Result<()> {
        let statements = [
            writer::define_statement(WP_MEMORY_LIMIT, &memory.to_string()),
            writer::define_statement(WP_MAX_MEMORY_LIMIT, &max.to_string()),
        ];

        let on_disk = self.read_document()?.to_lowercase();
        let all_present = statements
            .iter()
            .all(|stmt| on_disk.contains(&stmt.to_lowercase()));

        if all_present {
            Ok(())
        } else {
            Err(WplimitsError::DefinesNotAdded {
                statements: statements.to_vec(),
            })
        }
    }

    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        backup::list_backups(&self.config_path)
    }

    pub fn prune_backups(&self) {
        backup::cleanup_old_backups(&self.config_path);
    }
}
