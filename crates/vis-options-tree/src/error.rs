//! Merge error types.

use std::fmt;

use crate::tree::Kind;

/// Which argument of a merge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The base tree (first argument).
    Original,
    /// The tree whose values win on conflict (second argument).
    Override,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Original => "original",
            Side::Override => "override",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by [`crate::merge`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// A top-level argument was not a mapping.
    #[error("{side} tree must be a mapping at the top level, found {found}")]
    NotAMapping { side: Side, found: Kind },
}
