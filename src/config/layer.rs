//! Option layer sources: files and `--set` assignments

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use vis_options_tree::{merge, ConfigTree, Mapping};

use super::error::OptionsError;

/// An options file parsed into a tree, with the digest of its raw bytes.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub tree: ConfigTree,
    /// SHA-256 hex digest of the file contents.
    pub digest: String,
}

/// Load an options file. The format is chosen by extension (`.json`, `.toml`).
///
/// The top level must be a mapping; an empty TOML file is an empty mapping.
pub fn load_options_file(path: &Path) -> Result<LoadedFile, OptionsError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension != "json" && extension != "toml" {
        return Err(OptionsError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let bytes = fs::read(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes).map_err(|e| OptionsError::Parse {
        path: path.to_path_buf(),
        reason: format!("Invalid UTF-8: {}", e),
    })?;

    let value = if extension == "json" {
        serde_json::from_str::<Value>(&contents).map_err(|e| OptionsError::Parse {
            path: path.to_path_buf(),
            reason: format!("JSON parse error: {}", e),
        })?
    } else {
        let table: toml::Table = toml::from_str(&contents).map_err(|e| OptionsError::Parse {
            path: path.to_path_buf(),
            reason: format!("TOML parse error: {}", e),
        })?;
        toml_to_json(toml::Value::Table(table))
    };

    let tree = ConfigTree::from(value);
    if !tree.is_mapping() {
        return Err(OptionsError::NotAMapping {
            path: path.to_path_buf(),
            found: tree.kind(),
        });
    }

    tracing::debug!(path = %path.display(), %digest, "loaded options file");
    Ok(LoadedFile { tree, digest })
}

/// Convert a TOML value into the JSON data model
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Parse a `path.to.key=value` assignment into a nested tree.
///
/// The value is read as JSON when it parses (`12`, `true`, `null`,
/// `"quoted"`, `[1, 2]`, `{"a": 1}`), otherwise as a plain string.
/// Whitespace around the key path and the value is ignored.
pub fn parse_assignment(assignment: &str) -> Result<ConfigTree, OptionsError> {
    let invalid = |reason: &str| OptionsError::InvalidAssignment {
        assignment: assignment.to_string(),
        reason: reason.to_string(),
    };

    let (path, raw) = assignment
        .split_once('=')
        .ok_or_else(|| invalid("expected PATH=VALUE"))?;

    let path = path.trim();
    if path.is_empty() {
        return Err(invalid("empty key path"));
    }
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid("empty segment in key path"));
    }

    let value = serde_json::from_str::<Value>(raw.trim())
        .unwrap_or_else(|_| Value::String(raw.trim().to_string()));

    let mut node = ConfigTree::from(value);
    for segment in segments.into_iter().rev() {
        let mut mapping = Mapping::new();
        mapping.insert(segment, node);
        node = ConfigTree::Mapping(mapping);
    }
    Ok(node)
}

/// Combine assignments into one layer. Later assignments win.
pub fn assignments_to_tree<S: AsRef<str>>(assignments: &[S]) -> Result<ConfigTree, OptionsError> {
    let mut merged = ConfigTree::empty();
    for assignment in assignments {
        let next = parse_assignment(assignment.as_ref())?;
        merged = merge(&merged, &next)?;
    }
    Ok(merged)
}
