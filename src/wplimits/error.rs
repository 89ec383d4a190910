use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WplimitsError {
    #[error("{field} format is invalid ({value:?}). Use format like: 256M, 512M, 1G")]
    InvalidFormat { field: &'static str, value: String },

    #[error("WP_MAX_MEMORY_LIMIT ({max}) must be greater than or equal to WP_MEMORY_LIMIT ({memory})")]
    ValueOrdering { memory: String, max: String },

    #[error("Could not locate wp-config.php file")]
    ConfigNotFound,

    #[error("wp-config.php is not writable. Please check file permissions for: {0}")]
    ConfigNotWritable(PathBuf),

    #[error("Could not create backup of wp-config.php: {0}")]
    BackupFailed(#[source] std::io::Error),

    #[error("Could not write to wp-config.php ({source}). The backup has been restored.")]
    WriteFailed { source: std::io::Error },

    #[error(
        "The file was written but the defines were not added correctly; it may have an \
         unusual format. Check the backup and add these lines manually:\n{}",
        .statements.join("\n")
    )]
    DefinesNotAdded { statements: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WplimitsError>;
