//! Reconciling what the file says against what the runtime sees.
//!
//! Findings are informational only. They are recomputed on every read and
//! never block an edit; a duplicate definition or a mismatching live value is
//! something the administrator needs to know about, not something this tool
//! can fix by itself.

use crate::scan;
use crate::MANAGED_CONSTANTS;
use serde::Serialize;

/// Source of the values actually in effect in the host runtime, which may
/// diverge from the file when something else defined the constant first.
pub trait LiveValues {
    fn get(&self, constant_name: &str) -> Option<String>;
}

/// Reads live values from the process environment. A WP-CLI wrapper or
/// deploy script exports the constants it sees before invoking the tool.
pub struct EnvLiveValues;

impl LiveValues for EnvLiveValues {
    fn get(&self, constant_name: &str) -> Option<String> {
        std::env::var(constant_name).ok().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    MultipleDefinitions,
    ValueMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictFinding {
    pub kind: ConflictKind,
    pub constant: String,
    pub detail: String,
}

/// Scan the document for both managed constants and report, per constant in
/// fixed order: multiple definitions first, then a live-value mismatch.
pub fn find_conflicts(document: &str, live: &dyn LiveValues) -> Vec<ConflictFinding> {
    let mut findings = Vec::new();

    for name in MANAGED_CONSTANTS {
        let record = scan::scan(document, name);

        if record.occurrences > 1 {
            findings.push(ConflictFinding {
                kind: ConflictKind::MultipleDefinitions,
                constant: name.to_string(),
                detail: format!(
                    "{name} is defined {} times in wp-config.php. Only the first one takes effect.",
                    record.occurrences
                ),
            });
        }

        if let (Some(file_value), Some(live_value)) = (&record.first_value, live.get(name)) {
            if *file_value != live_value {
                findings.push(ConflictFinding {
                    kind: ConflictKind::ValueMismatch,
                    constant: name.to_string(),
                    detail: format!(
                        "{name} in wp-config.php is \"{file_value}\" but the site is using \
                         \"{live_value}\". It is likely defined elsewhere (theme, plugin, or \
                         mu-plugin)."
                    ),
                });
            }
        }
    }

    findings
}
