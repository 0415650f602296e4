//! Nested configuration trees and their right-biased deep merge.
//!
//! A [`ConfigTree`] is a mapping, a sequence, or a scalar leaf. [`merge`]
//! combines two mapping trees so that:
//! - Mappings present on both sides are merged key by key (recursively)
//! - Any other conflict is won by the override side, wholesale
//! - Keys present on only one side are carried over unchanged
//!
//! Unchanged subtrees are shared with the inputs rather than copied.

mod error;
mod merge;
mod tree;

pub use error::{MergeError, Side};
pub use merge::{merge, merge_mappings};
pub use tree::{ConfigTree, Kind, Mapping, Scalar};
