//! Layered visualization options
//!
//! Builds the effective options by folding the deep merge over:
//! 1. A built-in preset
//! 2. Option files (JSON or TOML), in the order given
//! 3. `--set path=value` assignments

mod effective;
mod error;
mod layer;
mod merge;

pub use effective::{EffectiveOptions, LayerOrigin, OptionsSource, SCHEMA_ID, SCHEMA_VERSION};
pub use error::OptionsError;
pub use layer::{assignments_to_tree, load_options_file, parse_assignment, LoadedFile};
pub use merge::merge_layers;
