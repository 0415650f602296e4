//! Options errors

use std::path::PathBuf;

use vis_options_tree::{Kind, MergeError};

/// Errors raised while loading, layering or writing options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Unsupported options format '{extension}' for {} (expected .json or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Options in {} must be a mapping at the top level, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: Kind },

    #[error("Invalid assignment '{assignment}': {reason}")]
    InvalidAssignment { assignment: String, reason: String },

    #[error("Unknown preset '{name}' (expected one of: {expected})")]
    UnknownPreset { name: String, expected: String },

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("Canonical JSON error: {0}")]
    Canonicalize(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
