//! # Wplimits Architecture
//!
//! Wplimits is a **UI-agnostic config-editing library**. The CLI binary is a thin
//! client; everything it can do is available to any other front end through the
//! API facade.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: validates input, dispatches, collects       │
//! │    structured CmdResult/CmdMessage output                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (memsize, scan, writer, conflict)                     │
//! │  - Pure functions over in-memory text                       │
//! │  - No filesystem access whatsoever                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filesystem Edge (locate, backup, handler)                  │
//! │  - ConfigHandler is the only component that writes to disk  │
//! │  - backup → write → verify → rollback protocol lives here   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: One Writer
//!
//! Every text transform (`scan`, `writer`, `conflict`) takes a document in and
//! returns a value out; a failed disk write can never leave a half-mutated
//! in-memory document. [`handler::ConfigHandler`] alone decides when backups
//! are created and deleted and when the config file is rewritten.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`memsize`]: The `256M`/`1G` memory-size notation
//! - [`locate`]: Finding wp-config.php
//! - [`scan`]: Extracting existing `define()` statements
//! - [`writer`]: Rewriting a document with an updated definition
//! - [`backup`]: Backup naming and retention
//! - [`handler`]: The safe-write controller
//! - [`conflict`]: Reconciling file values against the live runtime
//! - [`error`]: Error types

pub mod api;
pub mod backup;
pub mod conflict;
pub mod error;
pub mod handler;
pub mod locate;
pub mod memsize;
pub mod scan;
pub mod writer;

/// Filename the locator searches for.
pub const CONFIG_FILE_NAME: &str = "wp-config.php";

/// The base memory-limit constant WordPress reads on every request.
pub const WP_MEMORY_LIMIT: &str = "WP_MEMORY_LIMIT";

/// The elevated limit used for admin and cron contexts.
pub const WP_MAX_MEMORY_LIMIT: &str = "WP_MAX_MEMORY_LIMIT";

/// Both managed constants, in the order they are processed and reported.
pub const MANAGED_CONSTANTS: [&str; 2] = [WP_MEMORY_LIMIT, WP_MAX_MEMORY_LIMIT];
