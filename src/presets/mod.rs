//! Built-in visualization presets (lowest layer)
//!
//! Each preset is a complete options tree for the graph renderer: node and
//! edge styling, interaction flags and physics-simulation parameters.

use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use vis_options_tree::ConfigTree;

use crate::config::OptionsError;

/// A named built-in options preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Directed graph with fixed-width circular nodes and `to` arrows.
    #[default]
    Directed,
    /// Directed, with edge widths scaled by value.
    ScalingEdgesOnly,
    /// Node sizes and edge widths both scaled by value.
    ScalingNodes,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Directed, Preset::ScalingEdgesOnly, Preset::ScalingNodes];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Directed => "directed",
            Preset::ScalingEdgesOnly => "scaling-edges-only",
            Preset::ScalingNodes => "scaling-nodes",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Directed => "fixed-width circular nodes, directed edges with arrows",
            Preset::ScalingEdgesOnly => "directed layout with edge widths scaled by value",
            Preset::ScalingNodes => "node sizes and edge widths scaled by value",
        }
    }

    /// Build the preset's options tree.
    pub fn to_tree(&self) -> ConfigTree {
        let value = match self {
            Preset::Directed => json!({
                "nodes": fixed_width_nodes(),
                "edges": directed_edges(),
                "interaction": interaction(),
                "physics": physics()
            }),
            Preset::ScalingEdgesOnly => json!({
                "nodes": fixed_width_nodes(),
                "edges": scaling_edges(),
                "interaction": interaction(),
                "physics": physics()
            }),
            Preset::ScalingNodes => json!({
                "nodes": scaling_nodes(),
                "edges": scaling_edges(),
                "interaction": interaction(),
                "physics": physics()
            }),
        };
        ConfigTree::from(value)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| OptionsError::UnknownPreset {
                name: s.to_string(),
                expected: Preset::ALL.map(|p| p.name()).join(", "),
            })
    }
}

fn node_color() -> Value {
    json!({
        "background": "rgba(210, 229, 255, 1)",
        "border": "transparent",
        "highlight": {
            "background": "rgba(9, 104, 178, 1)",
            "border": "rgba(8, 62, 100, 1)"
        }
    })
}

fn fixed_width_nodes() -> Value {
    json!({
        "borderWidthSelected": 0,
        "borderWidth": 0,
        "color": node_color(),
        "shadow": {"enabled": false},
        "shape": "circle",
        "widthConstraint": {"minimum": 70, "maximum": 70},
        "font": {"face": "courier new", "color": "black", "size": 12}
    })
}

fn scaling_nodes() -> Value {
    json!({
        "borderWidthSelected": 0,
        "borderWidth": 0,
        "color": node_color(),
        "shadow": {"enabled": false},
        "shape": "circle",
        "font": {"face": "courier new", "color": "black"},
        "scaling": {
            "min": 20,
            "max": 10000,
            "label": {"min": 8, "max": 24}
        }
    })
}

fn directed_edges() -> Value {
    json!({
        "color": {"inherit": false},
        "smooth": {"enabled": true, "type": "straightCross"},
        "arrows": {"to": {"enabled": true, "type": "arrow"}},
        "font": {"face": "courier new"}
    })
}

fn scaling_edges() -> Value {
    json!({
        "arrowStrikethrough": false,
        "color": {"inherit": false},
        "smooth": {"enabled": true, "type": "straightCross"},
        "arrows": {"to": {"enabled": true, "type": "arrow"}},
        "font": {"face": "courier new"},
        "scaling": {
            "min": 3,
            "max": 9,
            "label": {"min": 12, "max": 12}
        }
    })
}

fn interaction() -> Value {
    json!({
        "hover": true,
        "hoverConnectedEdges": true,
        "selectConnectedEdges": false
    })
}

fn physics() -> Value {
    json!({
        "minVelocity": 0.75,
        "barnesHut": {
            "centralGravity": 0.1,
            "gravitationalConstant": -50450,
            "springLength": 95,
            "springConstant": 0.04,
            "damping": 0.09,
            "avoidOverlap": 0.1
        },
        "solver": "barnesHut",
        "enabled": true,
        "adaptiveTimestep": true,
        "stabilization": {"enabled": true, "iterations": 1}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vis_options_tree::merge;

    #[test]
    fn test_parse_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_unknown_name_lists_valid_presets() {
        let err = "hierarchical".parse::<Preset>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("hierarchical"));
        assert!(message.contains("directed, scaling-edges-only, scaling-nodes"));
    }

    #[test]
    fn test_default_is_directed() {
        assert_eq!(Preset::default(), Preset::Directed);
    }

    #[test]
    fn test_directed_contents() {
        let tree = Preset::Directed.to_tree();
        assert_eq!(tree.pointer("nodes.shape").and_then(ConfigTree::as_str), Some("circle"));
        assert_eq!(tree.pointer("nodes.widthConstraint.maximum").and_then(ConfigTree::as_i64), Some(70));
        assert_eq!(tree.pointer("edges.arrows.to.enabled").and_then(ConfigTree::as_bool), Some(true));
        assert_eq!(
            tree.pointer("physics.barnesHut.gravitationalConstant").and_then(ConfigTree::as_i64),
            Some(-50450)
        );
        assert!(tree.pointer("edges.scaling").is_none());
    }

    #[test]
    fn test_scaling_edges_only_extends_directed() {
        let overlay = ConfigTree::from(json!({
            "edges": {
                "arrowStrikethrough": false,
                "scaling": {"min": 3, "max": 9, "label": {"min": 12, "max": 12}}
            }
        }));
        let rebuilt = merge(&Preset::Directed.to_tree(), &overlay).unwrap();
        assert_eq!(rebuilt, Preset::ScalingEdgesOnly.to_tree());
    }

    #[test]
    fn test_scaling_nodes_contents() {
        let tree = Preset::ScalingNodes.to_tree();
        assert!(tree.pointer("nodes.widthConstraint").is_none());
        assert!(tree.pointer("nodes.font.size").is_none());
        assert_eq!(tree.pointer("nodes.scaling.max").and_then(ConfigTree::as_i64), Some(10000));
        assert_eq!(tree.pointer("nodes.scaling.label.max").and_then(ConfigTree::as_i64), Some(24));
        assert_eq!(tree.pointer("edges.scaling.min").and_then(ConfigTree::as_i64), Some(3));
    }
}
