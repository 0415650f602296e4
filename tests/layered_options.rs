//! Layered Options Tests
//!
//! End-to-end tests for building the renderer options from a preset,
//! option files and `--set` assignments.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use vis_options::{ConfigTree, EffectiveOptions, LayerOrigin, OptionsError, Preset};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_full_stack_precedence() {
    let dir = TempDir::new().unwrap();
    let team = write(
        &dir,
        "team.toml",
        r##"
            [nodes]
            shape = "dot"

            [nodes.color]
            background = "#ffcc00"

            [physics]
            enabled = false
        "##,
    );
    let mine = write(&dir, "mine.json", r#"{"nodes": {"shape": "box"}}"#);

    let effective = EffectiveOptions::build(
        Some(Preset::ScalingEdgesOnly),
        &[team, mine],
        &["physics.enabled=true".to_string()],
    )
    .unwrap();

    // Later file beats earlier file
    assert_eq!(effective.get_str("nodes.shape"), Some("box"));
    // File beats preset, sibling preset keys kept
    assert_eq!(effective.get_str("nodes.color.background"), Some("#ffcc00"));
    assert_eq!(effective.get_str("nodes.color.border"), Some("transparent"));
    assert_eq!(effective.get_str("nodes.color.highlight.border"), Some("rgba(8, 62, 100, 1)"));
    // CLI beats files
    assert_eq!(effective.get_bool("physics.enabled"), Some(true));
    // Untouched preset subtree survives
    assert_eq!(effective.get("edges.scaling.max").and_then(ConfigTree::as_i64), Some(9));

    let origins: Vec<LayerOrigin> = effective.sources.iter().map(|s| s.origin.clone()).collect();
    assert_eq!(
        origins,
        vec![LayerOrigin::Preset, LayerOrigin::File, LayerOrigin::File, LayerOrigin::Cli]
    );
}

#[test]
fn test_sequence_override_replaces_preset_value() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "dashes.json", r#"{"edges": {"dashes": [10, 4]}}"#);

    let first = EffectiveOptions::build(Some(Preset::Directed), &[file], &[]).unwrap();
    let second = EffectiveOptions::build(
        Some(Preset::Directed),
        &[],
        &["edges.dashes=[10, 4]".to_string(), "edges.dashes=[2]".to_string()],
    )
    .unwrap();

    assert_eq!(first.get("edges.dashes").unwrap().to_value(), json!([10, 4]));
    assert_eq!(second.get("edges.dashes").unwrap().to_value(), json!([2]));
}

#[test]
fn test_scalar_override_of_preset_mapping() {
    let effective = EffectiveOptions::build(
        Some(Preset::Directed),
        &[],
        &["nodes.color=red".to_string()],
    )
    .unwrap();

    assert_eq!(effective.get_str("nodes.color"), Some("red"));
    assert!(effective.get("nodes.color.background").is_none());
}

#[test]
fn test_presets_are_not_modified_by_overrides() {
    let before = Preset::Directed.to_tree();
    let _ = EffectiveOptions::build(Some(Preset::Directed), &[], &["nodes.shape=star".to_string()]).unwrap();
    assert_eq!(Preset::Directed.to_tree(), before);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_invalid_assignment_fails() {
    let result = EffectiveOptions::build(Some(Preset::Directed), &[], &["nodes.shape".to_string()]);
    assert!(matches!(result, Err(OptionsError::InvalidAssignment { .. })));
}

#[test]
fn test_invalid_toml_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "bad.toml", "[nodes\nshape = 1");

    let err = EffectiveOptions::build(Some(Preset::Directed), &[file], &[]).unwrap_err();
    assert!(matches!(err, OptionsError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_scalar_json_file_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "scalar.json", "42");

    let err = EffectiveOptions::build(None, &[file], &[]).unwrap_err();
    assert!(err.to_string().contains("found number"));
}

// =============================================================================
// Provenance
// =============================================================================

#[test]
fn test_digest_ignores_formatting_of_sources() {
    let dir = TempDir::new().unwrap();
    let compact = write(&dir, "compact.json", r#"{"nodes":{"shape":"box"}}"#);
    let spaced = write(&dir, "spaced.json", "{\n  \"nodes\": { \"shape\": \"box\" }\n}\n");

    let a = EffectiveOptions::build(Some(Preset::Directed), &[compact], &[]).unwrap();
    let b = EffectiveOptions::build(Some(Preset::Directed), &[spaced], &[]).unwrap();

    assert_ne!(a.sources[1].digest, b.sources[1].digest);
    assert_eq!(a.options_digest, b.options_digest);
}

#[test]
fn test_digest_matches_cli_equivalent() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "size.json", r#"{"nodes": {"font": {"size": 30}}}"#);

    let from_file = EffectiveOptions::build(Some(Preset::Directed), &[file], &[]).unwrap();
    let from_cli =
        EffectiveOptions::build(Some(Preset::Directed), &[], &["nodes.font.size=30".to_string()]).unwrap();

    assert_eq!(from_file.options, from_cli.options);
    assert_eq!(from_file.options_digest, from_cli.options_digest);
}
