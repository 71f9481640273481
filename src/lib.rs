//! Ladybug Display
//!
//! Display attributes for geometry and translation of climate diagrams (sun
//! paths, wind roses, compasses) into visualization sets that a renderer can
//! draw without knowing anything about the diagrams themselves.
//!
//! Module organization:
//! - `geometry`: minimal geometry primitives
//! - `display`: attributes, colors, colorsets and the property registry
//! - `diagrams`: the analytical objects
//! - `visualization`: context and analysis groups, visualization sets
//! - `extension`: translators from diagrams to visualization sets
//! - `config` and `pipeline`: property driven translation used by the binary

pub mod config;
pub mod diagrams;
pub mod display;
pub mod extension;
pub mod geometry;
pub mod pipeline;
pub mod visualization;

pub use config::{DiagramKind, TranslationConfig};
pub use display::{DisplayError, Result};
pub use extension::{StyleOverrides, ToVisualizationSet};
pub use visualization::VisualizationSet;
