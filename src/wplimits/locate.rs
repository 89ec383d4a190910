//! Finding wp-config.php.
//!
//! WordPress allows the config file to live one directory above the install
//! root (a common layout that keeps it out of the web root), so the locator
//! checks exactly two candidates, in order.

use crate::CONFIG_FILE_NAME;
use std::path::{Path, PathBuf};

/// Return the first existing candidate: `base_dir/wp-config.php`, then
/// `parent(base_dir)/wp-config.php`.
pub fn locate_config(base_dir: &Path) -> Option<PathBuf> {
    let standard = base_dir.join(CONFIG_FILE_NAME);
    if standard.exists() {
        return Some(standard);
    }

    if let Some(parent) = base_dir.parent() {
        let above = parent.join(CONFIG_FILE_NAME);
        if above.exists() {
            return Some(above);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prefers_base_dir() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("public");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("wp-config.php"), "<?php\n").unwrap();
        fs::write(temp.path().join("wp-config.php"), "<?php\n").unwrap();

        assert_eq!(locate_config(&base), Some(base.join("wp-config.php")));
    }

    #[test]
    fn test_falls_back_to_parent() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("public");
        fs::create_dir_all(&base).unwrap();
        fs::write(temp.path().join("wp-config.php"), "<?php\n").unwrap();

        assert_eq!(
            locate_config(&base),
            Some(temp.path().join("wp-config.php"))
        );
    }

    #[test]
    fn test_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("public");
        fs::create_dir_all(&base).unwrap();

        assert_eq!(locate_config(&base), None);
    }
}
