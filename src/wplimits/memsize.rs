//! The `256M` / `1G` memory-size notation used by WordPress and php.ini.
//!
//! Only whole mebibyte and gibibyte counts are accepted; that is the full
//! range the managed constants take in practice, and rejecting everything
//! else keeps validation a single pattern.

use crate::error::{Result, WplimitsError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static MEMSIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([MGmg])$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Mebibytes,
    Gibibytes,
}

impl Unit {
    fn suffix(self) -> char {
        match self {
            Unit::Mebibytes => 'M',
            Unit::Gibibytes => 'G',
        }
    }

    fn byte_factor(self) -> u64 {
        match self {
            Unit::Mebibytes => 1024 * 1024,
            Unit::Gibibytes => 1024 * 1024 * 1024,
        }
    }
}

/// A validated memory-limit value: a whole number of `M` or `G`.
///
/// The canonical textual form is uppercase (`256M`, `1G`); parsing accepts
/// either case. Comparison and equality are by byte value, so `1024M` and
/// `1G` compare equal while keeping their own textual forms.
#[derive(Debug, Clone, Copy)]
pub struct MemorySize {
    amount: u64,
    unit: Unit,
}

impl MemorySize {
    pub fn new(amount: u64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    pub fn bytes(&self) -> u64 {
        // Parsing rejects amounts whose byte count does not fit u64;
        // saturate for values built directly with `new` so comparisons
        // never wrap.
        self.amount.saturating_mul(self.unit.byte_factor())
    }

    /// Parse with a field name for error reporting, e.g. the form-field the
    /// value came from.
    pub fn parse_field(field: &'static str, value: &str) -> Result<Self> {
        let caps = MEMSIZE_RE
            .captures(value)
            .ok_or_else(|| WplimitsError::InvalidFormat {
                field,
                value: value.to_string(),
            })?;

        // A digit run can overflow u64 outright, or overflow once scaled to
        // bytes; both are the same validation failure.
        let amount: u64 = caps[1].parse().map_err(|_| WplimitsError::InvalidFormat {
            field,
            value: value.to_string(),
        })?;

        let unit = match caps[2].to_ascii_uppercase().as_str() {
            "M" => Unit::Mebibytes,
            _ => Unit::Gibibytes,
        };

        if amount.checked_mul(unit.byte_factor()).is_none() {
            return Err(WplimitsError::InvalidFormat {
                field,
                value: value.to_string(),
            });
        }

        Ok(Self { amount, unit })
    }
}

impl FromStr for MemorySize {
    type Err = WplimitsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_field("memory value", s)
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl PartialEq for MemorySize {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl Eq for MemorySize {}

impl std::hash::Hash for MemorySize {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes().hash(state);
    }
}

impl PartialOrd for MemorySize {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemorySize {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes().cmp(&other.bytes())
    }
}
