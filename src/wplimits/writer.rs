//! Rewriting a wp-config.php document with an updated `define()`.
//!
//! Pure text transforms only; the caller decides when the result reaches
//! disk. Every line other than the one being replaced (or the two being
//! inserted) comes through verbatim, and the document's `\n` joins are
//! preserved exactly as split.

use crate::scan;
use once_cell::sync::Lazy;
use regex::Regex;

/// Any `define(` opener, used to find the last definition in a file that has
/// neither a sentinel comment nor a wp-settings.php include.
static ANY_DEFINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)define\s*\(").unwrap());

/// The canonical statement form. Verification after a write looks for this
/// exact text, so formatting here and there must agree.
pub fn define_statement(constant_name: &str, value: &str) -> String {
    format!("define( '{constant_name}', '{value}' );")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Replace the first definition of `constant_name`, or insert a new one at
/// the best available spot. Returns the new document.
///
/// Only the first occurrence is normalized. Later duplicates are left alone:
/// they are a conflict for the reconciler to report, not something to
/// silently collapse.
pub fn upsert(document: &str, constant_name: &str, value: &str) -> String {
    let statement = define_statement(constant_name, value);
    let mut lines: Vec<String> = document.split('\n').map(str::to_string).collect();

    let name_re = scan::name_pattern(constant_name);
    if let Some(line) = lines.iter_mut().find(|line| name_re.is_match(line.as_str())) {
        *line = statement;
        return lines.join("\n");
    }

    let insertion_index = find_insertion_index(&lines);
    lines.splice(insertion_index..insertion_index, [String::new(), statement]);
    lines.join("\n")
}

/// The fallback chain for a constant that does not exist yet, tried in order:
///
/// 1. before the "That's all, stop editing!" sentinel comment,
/// 2. before the `wp-settings.php` include,
/// 3. after the last existing `define(` (scanning from the end),
/// 4. before the closing `?>` tag (scanning from the end),
/// 5. at the end of the document.
fn find_insertion_index(lines: &[String]) -> usize {
    if let Some(i) = lines
        .iter()
        .position(|l| contains_ci(l, "That's all") || contains_ci(l, "stop editing"))
    {
        return i;
    }

    if let Some(i) = lines.iter().position(|l| contains_ci(l, "wp-settings.php")) {
        return i;
    }

    if let Some(i) = lines.iter().rposition(|l| ANY_DEFINE.is_match(l)) {
        return i + 1;
    }

    if let Some(i) = lines.iter().rposition(|l| l.contains("?>")) {
        return i;
    }

    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;

    const FRESH: &str = "<?php\n\
        define( 'DB_NAME', 'wordpress' );\n\
        \n\
        /* That's all, stop editing! Happy publishing. */\n\
        require_once ABSPATH . 'wp-settings.php';\n";

    #[test]
    fn test_replaces_existing_line_in_place() {
        let doc = "<?php\ndefine( 'WP_MEMORY_LIMIT', '128M' );\nrequire_once ABSPATH . 'wp-settings.php';\n";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");

        assert!(out.contains("define( 'WP_MEMORY_LIMIT', '256M' );"));
        assert!(!out.contains("128M"));
        assert_eq!(out.lines().count(), doc.lines().count());
    }

    #[test]
    fn test_inserts_before_sentinel() {
        let out = upsert(FRESH, "WP_MEMORY_LIMIT", "256M");
        let lines: Vec<&str> = out.split('\n').collect();

        let stmt = lines
            .iter()
            .position(|l| *l == "define( 'WP_MEMORY_LIMIT', '256M' );")
            .unwrap();
        let sentinel = lines
            .iter()
            .position(|l| l.contains("stop editing"))
            .unwrap();
        assert_eq!(stmt + 1, sentinel);
        // Blank spacer line precedes the new statement.
        assert_eq!(lines[stmt - 1], "");
    }

    #[test]
    fn test_inserts_before_settings_include_without_sentinel() {
        let doc = "<?php\ndefine( 'DB_NAME', 'wp' );\nrequire_once ABSPATH . 'wp-settings.php';\n";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");
        let lines: Vec<&str> = out.split('\n').collect();

        let stmt = lines
            .iter()
            .position(|l| l.contains("WP_MEMORY_LIMIT"))
            .unwrap();
        assert!(lines[stmt + 1].contains("wp-settings.php"));
    }

    #[test]
    fn test_inserts_after_last_define_without_include() {
        let doc = "<?php\ndefine( 'DB_NAME', 'wp' );\ndefine( 'DB_USER', 'root' );\n$x = 1;";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");
        let lines: Vec<&str> = out.split('\n').collect();

        let last_define = lines.iter().position(|l| l.contains("DB_USER")).unwrap();
        assert_eq!(lines[last_define + 1], "");
        assert_eq!(
            lines[last_define + 2],
            "define( 'WP_MEMORY_LIMIT', '256M' );"
        );
    }

    #[test]
    fn test_inserts_before_closing_tag_as_last_resort() {
        let doc = "<?php\n$x = 1;\n?>";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");
        let lines: Vec<&str> = out.split('\n').collect();

        let stmt = lines
            .iter()
            .position(|l| l.contains("WP_MEMORY_LIMIT"))
            .unwrap();
        assert_eq!(lines[stmt + 1], "?>");
    }

    #[test]
    fn test_appends_when_nothing_matches() {
        let doc = "<?php\n$x = 1;";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");
        assert!(out.ends_with("\ndefine( 'WP_MEMORY_LIMIT', '256M' );"));
    }

    #[test]
    fn test_round_trip_with_scanner() {
        let out = upsert(FRESH, "WP_MEMORY_LIMIT", "256M");
        let record = scan(&out, "WP_MEMORY_LIMIT");
        assert_eq!(record.first_value.as_deref(), Some("256M"));
        assert_eq!(record.occurrences, 1);
    }

    #[test]
    fn test_idempotence_of_intent() {
        let once = upsert(FRESH, "WP_MEMORY_LIMIT", "256M");
        let twice = upsert(&once, "WP_MEMORY_LIMIT", "256M");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_only_first_duplicate_normalized() {
        let doc = "define( 'WP_MEMORY_LIMIT', '128M' );\n\
                   define( 'WP_MEMORY_LIMIT', '512M' );\n";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");

        assert!(out.contains("define( 'WP_MEMORY_LIMIT', '256M' );"));
        assert!(out.contains("define( 'WP_MEMORY_LIMIT', '512M' );"));
        assert_eq!(scan(&out, "WP_MEMORY_LIMIT").occurrences, 2);
    }

    #[test]
    fn test_does_not_touch_sibling_constant() {
        let doc = "define( 'WP_MAX_MEMORY_LIMIT', '512M' );\n\
                   require_once ABSPATH . 'wp-settings.php';\n";
        let out = upsert(doc, "WP_MEMORY_LIMIT", "256M");

        assert!(out.contains("define( 'WP_MAX_MEMORY_LIMIT', '512M' );"));
        assert_eq!(scan(&out, "WP_MAX_MEMORY_LIMIT").occurrences, 1);
    }

    #[test]
    fn test_unrelated_lines_preserved_verbatim() {
        let out = upsert(FRESH, "WP_MEMORY_LIMIT", "256M");
        for line in FRESH.split('\n') {
            assert!(out.split('\n').any(|l| l == line), "lost line {line:?}");
        }
        // Trailing newline from the original survives the split/join.
        assert!(out.ends_with('\n'));
    }
}
