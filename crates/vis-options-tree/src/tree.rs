//! The configuration tree value type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A mapping from string keys to subtrees.
///
/// Keys are kept sorted so serialized output is deterministic. Values are
/// reference counted, which lets a merge result share untouched subtrees
/// with its inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: BTreeMap<String, Arc<ConfigTree>>,
}

/// A nested configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigTree {
    Mapping(Mapping),
    /// Opaque to merging: replaced wholesale, never merged element-wise.
    Sequence(Vec<ConfigTree>),
    Scalar(Scalar),
}

/// The variant of a [`ConfigTree`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Mapping,
    Sequence,
    Null,
    Bool,
    Number,
    String,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Mapping => "mapping",
            Kind::Sequence => "sequence",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        self.entries.get(key).map(Arc::as_ref)
    }

    /// Get the shared handle for a key, for callers that want to reuse it.
    pub fn get_shared(&self, key: &str) -> Option<&Arc<ConfigTree>> {
        self.entries.get(key)
    }

    /// Insert a value, returning the previous one if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigTree>) -> Option<Arc<ConfigTree>> {
        self.entries.insert(key.into(), Arc::new(value.into()))
    }

    /// Insert an already shared value without copying it.
    pub fn insert_shared(&mut self, key: impl Into<String>, value: Arc<ConfigTree>) -> Option<Arc<ConfigTree>> {
        self.entries.insert(key.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigTree)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, Arc<ConfigTree>> {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<ConfigTree>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl ConfigTree {
    /// An empty mapping.
    pub fn empty() -> Self {
        ConfigTree::Mapping(Mapping::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            ConfigTree::Mapping(_) => Kind::Mapping,
            ConfigTree::Sequence(_) => Kind::Sequence,
            ConfigTree::Scalar(Scalar::Null) => Kind::Null,
            ConfigTree::Scalar(Scalar::Bool(_)) => Kind::Bool,
            ConfigTree::Scalar(Scalar::Number(_)) => Kind::Number,
            ConfigTree::Scalar(Scalar::String(_)) => Kind::String,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigTree::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigTree::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigTree]> {
        match self {
            ConfigTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a direct child key. Non-mappings have no children.
    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        self.as_mapping()?.get(key)
    }

    /// Look up a dot-separated key path, e.g. `edges.arrows.to.enabled`.
    pub fn pointer(&self, path: &str) -> Option<&ConfigTree> {
        let mut current = self;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigTree::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigTree::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigTree::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigTree::Scalar(Scalar::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigTree::Scalar(Scalar::Null))
    }

    /// Convert into the `serde_json` data model.
    pub fn to_value(&self) -> Value {
        match self {
            ConfigTree::Mapping(m) => Value::Object(
                m.iter()
                    .map(|(k, v)| (k.to_string(), v.to_value()))
                    .collect(),
            ),
            ConfigTree::Sequence(items) => Value::Array(items.iter().map(ConfigTree::to_value).collect()),
            ConfigTree::Scalar(Scalar::Null) => Value::Null,
            ConfigTree::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            ConfigTree::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            ConfigTree::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        }
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        ConfigTree::empty()
    }
}

/// Frees nested children from a heap stack so dropping deep trees does not
/// recurse. Subtrees still shared with another tree only lose a reference.
impl Drop for ConfigTree {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(node: &mut ConfigTree, pending: &mut Vec<ConfigTree>) {
    match node {
        ConfigTree::Mapping(m) => {
            for (_, child) in std::mem::take(&mut m.entries) {
                if let Ok(child) = Arc::try_unwrap(child) {
                    pending.push(child);
                }
            }
        }
        ConfigTree::Sequence(items) => pending.append(items),
        ConfigTree::Scalar(_) => {}
    }
}

impl From<Value> for ConfigTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigTree::Scalar(Scalar::Null),
            Value::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ConfigTree::Scalar(Scalar::Number(n)),
            Value::String(s) => ConfigTree::Scalar(Scalar::String(s)),
            Value::Array(items) => ConfigTree::Sequence(items.into_iter().map(ConfigTree::from).collect()),
            Value::Object(map) => ConfigTree::Mapping(map.into_iter().collect()),
        }
    }
}

impl From<&ConfigTree> for Value {
    fn from(tree: &ConfigTree) -> Self {
        tree.to_value()
    }
}

impl From<ConfigTree> for Value {
    fn from(tree: ConfigTree) -> Self {
        tree.to_value()
    }
}

impl From<Mapping> for ConfigTree {
    fn from(mapping: Mapping) -> Self {
        ConfigTree::Mapping(mapping)
    }
}

impl From<Scalar> for ConfigTree {
    fn from(scalar: Scalar) -> Self {
        ConfigTree::Scalar(scalar)
    }
}

impl From<bool> for ConfigTree {
    fn from(b: bool) -> Self {
        ConfigTree::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for ConfigTree {
    fn from(n: i64) -> Self {
        ConfigTree::Scalar(Scalar::Number(n.into()))
    }
}

impl From<u64> for ConfigTree {
    fn from(n: u64) -> Self {
        ConfigTree::Scalar(Scalar::Number(n.into()))
    }
}

/// Non-finite floats have no interchange representation and become null.
impl From<f64> for ConfigTree {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
            .map(|n| ConfigTree::Scalar(Scalar::Number(n)))
            .unwrap_or(ConfigTree::Scalar(Scalar::Null))
    }
}

impl From<&str> for ConfigTree {
    fn from(s: &str) -> Self {
        ConfigTree::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for ConfigTree {
    fn from(s: String) -> Self {
        ConfigTree::Scalar(Scalar::String(s))
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigTree::Mapping(m) => serializer.collect_map(m.iter()),
            ConfigTree::Sequence(items) => serializer.collect_seq(items),
            ConfigTree::Scalar(Scalar::Null) => serializer.serialize_unit(),
            ConfigTree::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            ConfigTree::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            ConfigTree::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ConfigTree::from)
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
