//! Visualization sets consumed by external viewers
//!
//! A visualization set is an ordered list of named groups. Context groups hold
//! decorated geometry; analysis groups hold plain geometry colored by one or
//! more data sets.
//!
//! Structure:
//! - `context.rs`: groups of decorated geometry
//! - `analysis.rs`: data sets, legends and analysis groups
//! - `set.rs`: the set itself and the assembler

pub mod analysis;
pub mod context;
pub mod set;

pub use analysis::{AnalysisGeometry, LegendParameters, MatchingMethod, VisualizationData};
pub use context::ContextGeometry;
pub use set::{assemble, VisualizationGroup, VisualizationSet};

use crate::display::error::{DisplayError, Result};

/// Longest identifier accepted for sets and groups
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

/// Check that a set or group identifier can be used by viewers
///
/// Identifiers must be non-empty, at most 100 characters, free of control
/// characters and without surrounding whitespace.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(DisplayError::InvalidIdentifier(
            "identifier must not be empty".to_string(),
        ));
    }
    if identifier.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(DisplayError::InvalidIdentifier(format!(
            "'{}' is longer than {} characters",
            identifier, MAX_IDENTIFIER_LENGTH
        )));
    }
    if identifier.chars().any(char::is_control) {
        return Err(DisplayError::InvalidIdentifier(format!(
            "{:?} contains control characters",
            identifier
        )));
    }
    if identifier.trim() != identifier {
        return Err(DisplayError::InvalidIdentifier(format!(
            "'{}' has leading or trailing whitespace",
            identifier
        )));
    }
    Ok(())
}
