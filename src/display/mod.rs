//! Display attributes and decorated geometry
//!
//! This module contains everything needed to describe how a geometry object is
//! drawn: colors, line widths and types, display modes, colorsets for analysis
//! legends and the property registry that feeds them.

pub mod attributes;
pub mod color;
pub mod colorsets;
pub mod error;
pub mod geometry;
pub mod properties;

pub use attributes::{
    AttributeOptions, AttributeOverride, DisplayAttributes, DisplayMode, LineType, LineWidth,
};
pub use color::Color;
pub use colorsets::{colorsets, Colorset, ColorsetRegistry, DEFAULT_COLORSET};
pub use error::{DisplayError, Result};
pub use geometry::DisplayGeometry;
pub use properties::{PropertyReader, PropertyRegistry};
