//! Effective options with full provenance
//!
//! The effective options document captures the merged options tree plus
//! information about where each layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use vis_options_tree::ConfigTree;

use super::error::OptionsError;
use super::layer::{assignments_to_tree, load_options_file};
use super::merge::merge_layers;
use crate::presets::Preset;

/// Schema version for effective_options
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "vis-options/effective_options@1";

/// Origin of an options layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    Preset,
    File,
    Cli,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsSource {
    /// Origin of this layer
    pub origin: LayerOrigin,

    /// Preset name (preset layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// File path (file layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (file layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Effective options with full provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveOptions {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When these options were computed
    pub created_at: DateTime<Utc>,

    /// The merged options tree, as handed to the renderer
    pub options: ConfigTree,

    /// SHA-256 of the RFC 8785 canonical JSON of `options`
    pub options_digest: String,

    /// Contributing layers in precedence order
    pub sources: Vec<OptionsSource>,
}

impl EffectiveOptions {
    /// Build effective options from layers.
    ///
    /// Precedence, lowest first: preset, files in order, assignments.
    pub fn build(
        preset: Option<Preset>,
        files: &[PathBuf],
        assignments: &[String],
    ) -> Result<Self, OptionsError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Preset
        if let Some(preset) = preset {
            layers.push(preset.to_tree());
            sources.push(OptionsSource {
                origin: LayerOrigin::Preset,
                name: Some(preset.name().to_string()),
                path: None,
                digest: None,
            });
        }

        // Layer 2: Option files
        for path in files {
            let loaded = load_options_file(path)?;
            layers.push(loaded.tree);
            sources.push(OptionsSource {
                origin: LayerOrigin::File,
                name: None,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(loaded.digest),
            });
        }

        // Layer 3: CLI assignments
        if !assignments.is_empty() {
            layers.push(assignments_to_tree(assignments)?);
            sources.push(OptionsSource {
                origin: LayerOrigin::Cli,
                name: None,
                path: None,
                digest: None,
            });
        }

        if layers.is_empty() {
            tracing::warn!("no option layers given, effective options are empty");
        }

        tracing::debug!(layers = layers.len(), "merging option layers");
        let options = merge_layers(layers)?;
        let options_digest = Self::digest_of(&options)?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            options,
            options_digest,
            sources,
        })
    }

    /// Digest of a tree's canonical JSON form; equal trees give equal digests.
    pub fn digest_of(options: &ConfigTree) -> Result<String, OptionsError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(options)
            .map_err(|e| OptionsError::Canonicalize(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote effective options");
        Ok(())
    }

    /// Get an option by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&ConfigTree> {
        self.options.pointer(path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(|v| v.as_f64())
    }
}
