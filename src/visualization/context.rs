//! Groups of decorated context geometry

use super::validate_identifier;
use crate::display::error::Result;
use crate::display::DisplayGeometry;
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// A named group of decorated geometry drawn for context (no data attached)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextGeometry {
    pub identifier: String,
    pub display_name: String,
    pub geometry: Vec<DisplayGeometry>,
    #[serde(default)]
    pub hidden: bool,
}

impl ContextGeometry {
    /// Create a group; the display name defaults to the identifier
    pub fn new(identifier: impl Into<String>, geometry: Vec<DisplayGeometry>) -> Result<Self> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        Ok(ContextGeometry {
            display_name: identifier.clone(),
            identifier,
            geometry,
            hidden: false,
        })
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Undecorated geometry of the group, in display order
    pub fn raw_geometry(&self) -> impl Iterator<Item = &Geometry> {
        self.geometry.iter().map(|g| &g.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayError;
    use crate::geometry::Point3D;

    #[test]
    fn test_context_keeps_order() {
        let points: Vec<DisplayGeometry> = (0..5)
            .map(|i| DisplayGeometry::wireframe(Point3D::new(i as f64, 0.0, 0.0)))
            .collect();
        let group = ContextGeometry::new("Points", points.clone()).unwrap();

        assert_eq!(group.display_name, "Points");
        assert_eq!(group.len(), 5);
        assert_eq!(group.geometry, points);
        let xs: Vec<f64> = group
            .raw_geometry()
            .map(|g| match g {
                Geometry::Point3D(p) => p.x,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_context_rejects_bad_identifier() {
        assert!(matches!(
            ContextGeometry::new("", Vec::new()),
            Err(DisplayError::InvalidIdentifier(_))
        ));
    }
}
