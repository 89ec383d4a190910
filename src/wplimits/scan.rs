//! Extracting `define()` statements from wp-config.php text.
//!
//! This is deliberately a heuristic text match, not a PHP parser. It mirrors
//! what WordPress tooling conventionally does with wp-config.php, quirks
//! included: a commented-out `define()` is indistinguishable from a live one.
//! The constant name is matched as an exact quoted token, so scanning
//! `WP_MEMORY_LIMIT` never matches `WP_MAX_MEMORY_LIMIT`.

use regex::Regex;

/// What one scan of a document found for a single constant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRecord {
    pub exists: bool,
    /// Value captured from the first match in document order. This is the
    /// definition PHP honors; later duplicates are dead letters.
    pub first_value: Option<String>,
    pub occurrences: usize,
}

/// Matches `define ( 'NAME'` in either quote style, any spacing,
/// case-insensitive. Used for counting and for locating definition lines.
pub(crate) fn name_pattern(constant_name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)define\s*\(\s*['"]{}['"]"#,
        regex::escape(constant_name)
    ))
    .unwrap()
}

/// As [`name_pattern`] but extending through the quoted value, capturing it.
fn value_pattern(constant_name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)define\s*\(\s*['"]{}['"]\s*,\s*['"]([^'"]+)['"]\s*\)"#,
        regex::escape(constant_name)
    ))
    .unwrap()
}

/// Scan a document for one constant. Read-only and idempotent.
pub fn scan(document: &str, constant_name: &str) -> DefinitionRecord {
    let occurrences = name_pattern(constant_name).find_iter(document).count();
    let first_value = value_pattern(constant_name)
        .captures(document)
        .map(|caps| caps[1].to_string());

    DefinitionRecord {
        exists: occurrences > 0,
        first_value,
        occurrences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<?php\n\
        define( 'DB_NAME', 'wordpress' );\n\
        define( 'WP_MEMORY_LIMIT', '256M' );\n\
        define('WP_MAX_MEMORY_LIMIT','512M');\n\
        require_once ABSPATH . 'wp-settings.php';\n";

    #[test]
    fn test_finds_first_value_and_count() {
        let record = scan(DOC, "WP_MEMORY_LIMIT");
        assert!(record.exists);
        assert_eq!(record.first_value.as_deref(), Some("256M"));
        assert_eq!(record.occurrences, 1);
    }

    #[test]
    fn test_tight_spacing_and_double_quotes() {
        let record = scan(DOC, "WP_MAX_MEMORY_LIMIT");
        assert_eq!(record.first_value.as_deref(), Some("512M"));

        let doc = "define ( \"WP_MEMORY_LIMIT\" , \"1G\" );\n";
        let record = scan(doc, "WP_MEMORY_LIMIT");
        assert_eq!(record.first_value.as_deref(), Some("1G"));
    }

    #[test]
    fn test_case_insensitive_keyword() {
        let doc = "DEFINE( 'WP_MEMORY_LIMIT', '128M' );\n";
        assert!(scan(doc, "WP_MEMORY_LIMIT").exists);
    }

    #[test]
    fn test_no_partial_name_collision() {
        // WP_MEMORY_LIMIT occurs once; the WP_MAX_MEMORY_LIMIT line must not
        // inflate its count, and vice versa.
        let record = scan(DOC, "WP_MEMORY_LIMIT");
        assert_eq!(record.occurrences, 1);

        let doc = "define( 'WP_MAX_MEMORY_LIMIT', '512M' );\n";
        let record = scan(doc, "WP_MEMORY_LIMIT");
        assert!(!record.exists);
        assert_eq!(record.first_value, None);
    }

    #[test]
    fn test_counts_duplicates_keeps_first_value() {
        let doc = "define( 'WP_MEMORY_LIMIT', '128M' );\n\
                   define( 'WP_MEMORY_LIMIT', '512M' );\n";
        let record = scan(doc, "WP_MEMORY_LIMIT");
        assert_eq!(record.occurrences, 2);
        assert_eq!(record.first_value.as_deref(), Some("128M"));
    }

    #[test]
    fn test_missing_constant() {
        let record = scan("<?php\n", "WP_MEMORY_LIMIT");
        assert_eq!(
            record,
            DefinitionRecord {
                exists: false,
                first_value: None,
                occurrences: 0
            }
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(scan(DOC, "WP_MEMORY_LIMIT"), scan(DOC, "WP_MEMORY_LIMIT"));
    }
}
