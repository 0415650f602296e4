//! Layer folding
//!
//! Layers merge in order; the first is the base and the last has the
//! highest precedence. See `vis_options_tree::merge` for the per-pair rules.

use vis_options_tree::{merge, ConfigTree, MergeError};

/// Merge multiple option layers in order, starting from an empty mapping.
pub fn merge_layers(layers: Vec<ConfigTree>) -> Result<ConfigTree, MergeError> {
    layers
        .iter()
        .try_fold(ConfigTree::empty(), |merged, layer| merge(&merged, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vis_options_tree::Side;

    fn tree(value: serde_json::Value) -> ConfigTree {
        ConfigTree::from(value)
    }

    #[test]
    fn test_merge_layers() {
        let preset = tree(json!({
            "nodes": {"shape": "circle", "font": {"size": 12}},
            "physics": {"enabled": true}
        }));
        let team = tree(json!({
            "nodes": {"font": {"size": 14}}
        }));
        let project = tree(json!({
            "physics": {"enabled": false}
        }));
        let cli = tree(json!({
            "nodes": {"font": {"size": 20}}
        }));

        let result = merge_layers(vec![preset, team, project, cli]).unwrap();

        // CLI wins for font size
        assert_eq!(result.pointer("nodes.font.size").and_then(ConfigTree::as_i64), Some(20));
        // Project wins for physics
        assert_eq!(result.pointer("physics.enabled").and_then(ConfigTree::as_bool), Some(false));
        // Untouched preset keys survive
        assert_eq!(result.pointer("nodes.shape").and_then(ConfigTree::as_str), Some("circle"));
    }

    #[test]
    fn test_no_layers_is_empty() {
        assert_eq!(merge_layers(Vec::new()).unwrap(), ConfigTree::empty());
    }

    #[test]
    fn test_single_layer_is_unchanged() {
        let only = tree(json!({"edges": {"smooth": {"type": "straightCross"}}}));
        assert_eq!(merge_layers(vec![only.clone()]).unwrap(), only);
    }

    #[test]
    fn test_non_mapping_layer_rejected() {
        let err = merge_layers(vec![tree(json!({"a": 1})), tree(json!([1, 2]))]).unwrap_err();
        assert!(matches!(err, MergeError::NotAMapping { side: Side::Override, .. }));
    }
}
