//! Right-biased deep merge
//!
//! Merge semantics:
//! - Mapping vs mapping: merge key by key (recursive)
//! - Any other conflict: override wins entirely (sequences are never merged)
//! - One-sided keys: carried over unchanged, shared by reference
//!
//! Nested mappings are merged with an explicit worklist instead of call
//! recursion, so tree depth is bounded by the heap.

use std::sync::Arc;

use crate::error::{MergeError, Side};
use crate::tree::{ConfigTree, Mapping};

/// Deep merge two mapping trees, `overlay` taking precedence on conflict.
///
/// Neither input is modified. Both must be mappings at the top level;
/// anything else is rejected with [`MergeError::NotAMapping`].
pub fn merge(original: &ConfigTree, overlay: &ConfigTree) -> Result<ConfigTree, MergeError> {
    let left = original.as_mapping().ok_or(MergeError::NotAMapping {
        side: Side::Original,
        found: original.kind(),
    })?;
    let right = overlay.as_mapping().ok_or(MergeError::NotAMapping {
        side: Side::Override,
        found: overlay.kind(),
    })?;
    Ok(ConfigTree::Mapping(merge_mappings(left, right)))
}

/// Deep merge two mappings. Total: every pair of mappings merges.
pub fn merge_mappings(original: &Mapping, overlay: &Mapping) -> Mapping {
    let mut pending: Vec<Frame<'_>> = Vec::new();
    let mut current = Frame::open("", original, overlay);

    loop {
        if let Some((key, left, right)) = current.nested.next() {
            let child = Frame::open(key, left, right);
            pending.push(std::mem::replace(&mut current, child));
            continue;
        }

        let Some(mut parent) = pending.pop() else {
            return current.merged;
        };
        parent
            .merged
            .insert(current.key, ConfigTree::Mapping(current.merged));
        current = parent;
    }
}

/// One mapping pair being merged.
///
/// `merged` already holds every key that needed no recursion; `nested`
/// yields the shared keys whose values are mappings on both sides.
struct Frame<'a> {
    key: &'a str,
    merged: Mapping,
    nested: std::vec::IntoIter<(&'a str, &'a Mapping, &'a Mapping)>,
}

impl<'a> Frame<'a> {
    fn open(key: &'a str, original: &'a Mapping, overlay: &'a Mapping) -> Self {
        let mut merged = Mapping::new();
        let mut nested = Vec::new();

        for (name, value) in original.entries() {
            match overlay.get_shared(name) {
                None => {
                    merged.insert_shared(name.as_str(), Arc::clone(value));
                }
                Some(other) => match (value.as_ref(), other.as_ref()) {
                    (ConfigTree::Mapping(left), ConfigTree::Mapping(right)) => {
                        nested.push((name.as_str(), left, right));
                    }
                    _ => {
                        merged.insert_shared(name.as_str(), Arc::clone(other));
                    }
                },
            }
        }

        for (name, value) in overlay.entries() {
            if !original.contains_key(name) {
                merged.insert_shared(name.as_str(), Arc::clone(value));
            }
        }

        Self {
            key,
            merged,
            nested: nested.into_iter(),
        }
    }
}
