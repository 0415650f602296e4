//! vis-options - graph visualization option presets
//!
//! This crate builds the options object handed to a graph renderer by
//! deep-merging a built-in preset with user overrides from files and the
//! command line. The merge itself lives in `vis-options-tree`.

pub mod config;
pub mod presets;

pub use config::{EffectiveOptions, LayerOrigin, OptionsError, OptionsSource};
pub use presets::Preset;
pub use vis_options_tree::{merge, merge_mappings, ConfigTree, Kind, Mapping, MergeError, Scalar, Side};
