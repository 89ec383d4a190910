//! # API Facade
//!
//! The single entry point for all wplimits operations, regardless of the UI
//! in front of it. The facade validates input, dispatches to the handler and
//! the pure core, and returns structured results.
//!
//! Code from here inward never writes to stdout/stderr, never calls
//! `std::process::exit`, and never assumes a terminal.

use crate::conflict::{self, ConflictFinding, LiveValues};
use crate::error::{Result, WplimitsError};
use crate::handler::{ConfigHandler, FileValues};
use crate::memsize::MemorySize;
use crate::{WP_MAX_MEMORY_LIMIT, WP_MEMORY_LIMIT};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

/// Everything the diagnostics surface shows about the current state.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub config_path: PathBuf,
    pub writable: bool,
    /// Permission bits as an octal string; absent on platforms without
    /// unix-style modes.
    pub permissions: Option<String>,
    /// First-declared values in the file itself.
    pub file_values: FileValues,
    /// Values the host runtime reports as in effect.
    pub live_memory_limit: Option<String>,
    pub live_max_memory_limit: Option<String>,
    pub conflicts: Vec<ConflictFinding>,
    pub backups: Vec<PathBuf>,
}

pub struct MemoryLimitsApi<L: LiveValues> {
    handler: ConfigHandler,
    live: L,
}

impl<L: LiveValues> MemoryLimitsApi<L> {
    pub fn new(handler: ConfigHandler, live: L) -> Self {
        Self { handler, live }
    }

    pub fn handler(&self) -> &ConfigHandler {
        &self.handler
    }

    /// Assemble the full diagnostic picture: path, writability, declared and
    /// live values, conflicts, backups. Read-only.
    pub fn status(&self) -> Result<StatusReport> {
        let document = self.handler.read_document()?;
        let conflicts = conflict::find_conflicts(&document, &self.live);

        Ok(StatusReport {
            config_path: self.handler.config_path().to_path_buf(),
            writable: self.handler.is_writable(),
            permissions: self.handler.permissions_octal(),
            file_values: self.handler.file_values()?,
            live_memory_limit: self.live.get(WP_MEMORY_LIMIT),
            live_max_memory_limit: self.live.get(WP_MAX_MEMORY_LIMIT),
            conflicts,
            backups: self.handler.list_backups()?,
        })
    }

    /// Validate and apply new limits. On success the result carries a
    /// success message naming the backup, plus any conflict findings as
    /// warnings (they never fail the edit).
    pub fn set_limits(&self, memory: &str, max: &str) -> Result<CmdResult> {
        let memory = MemorySize::parse_field("WP Memory Limit", memory)?;
        let max = MemorySize::parse_field("WP Max Memory Limit", max)?;

        if max < memory {
            return Err(WplimitsError::ValueOrdering {
                memory: memory.to_string(),
                max: max.to_string(),
            });
        }

        let backup_path = self.handler.update_limits(&memory, &max)?;

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Memory limits updated: {WP_MEMORY_LIMIT}={memory}, {WP_MAX_MEMORY_LIMIT}={max}."
        )));
        result.add_message(CmdMessage::info(format!(
            "Backup saved to {}.",
            backup_path.display()
        )));

        // The file now says what was asked; the runtime may still disagree
        // until something reloads it, and duplicates remain worth flagging.
        let document = self.handler.read_document()?;
        for finding in conflict::find_conflicts(&document, &self.live) {
            result.add_message(CmdMessage::warning(finding.detail));
        }

        Ok(result)
    }

    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        self.handler.list_backups()
    }

    pub fn prune_backups(&self) -> Result<CmdResult> {
        let before = self.handler.list_backups()?.len();
        self.handler.prune_backups();
        let after = self.handler.list_backups()?.len();

        let mut result = CmdResult::default();
        if before > after {
            result.add_message(CmdMessage::success(format!(
                "Removed {} old backup(s); {} kept.",
                before - after,
                after
            )));
        } else {
            result.add_message(CmdMessage::info(format!(
                "Nothing to prune ({after} backup(s) present)."
            )));
        }
        Ok(result)
    }
}
