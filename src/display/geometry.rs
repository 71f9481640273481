//! Geometry decorated with display attributes

use super::attributes::{DisplayAttributes, DisplayMode};
use super::color::Color;
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// One geometry object paired with the attributes used to draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub geometry: Geometry,
    pub attributes: DisplayAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Value>,
}

impl DisplayGeometry {
    pub fn new(geometry: impl Into<Geometry>, attributes: DisplayAttributes) -> Self {
        DisplayGeometry {
            geometry: geometry.into(),
            attributes,
            user_data: None,
        }
    }

    /// Decorate raw geometry with default attributes
    ///
    /// Surface-like geometry (meshes, spheres) is drawn as wireframe.
    pub fn wireframe(geometry: impl Into<Geometry>) -> Self {
        let geometry = geometry.into();
        let attributes = if geometry.is_surface() {
            DisplayAttributes::default().with_display_mode(DisplayMode::Wireframe)
        } else {
            DisplayAttributes::default()
        };
        DisplayGeometry::new(geometry, attributes)
    }

    /// Decorate geometry with a color and otherwise default attributes
    pub fn colored(geometry: impl Into<Geometry>, color: Color) -> Self {
        DisplayGeometry::new(geometry, DisplayAttributes::default().with_color(color))
    }

    pub fn with_user_data(mut self, user_data: serde_json::Value) -> Self {
        self.user_data = Some(user_data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Mesh3D, Point3D, Polyline3D};

    #[test]
    fn test_wireframe_conversion() {
        let mesh = Mesh3D::new(
            vec![
                Point3D::new(0.0, 0.0, 0.0),
                Point3D::new(1.0, 0.0, 0.0),
                Point3D::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        )
        .unwrap();
        let surface = DisplayGeometry::wireframe(mesh);
        assert_eq!(surface.attributes.display_mode(), DisplayMode::Wireframe);

        let curve = DisplayGeometry::wireframe(Polyline3D::new(vec![Point3D::default()]));
        assert_eq!(curve.attributes.display_mode(), DisplayMode::Surface);
        assert_eq!(curve.attributes.color(), Color::BLACK);
    }

    #[test]
    fn test_user_data_serialization() {
        let geo = DisplayGeometry::colored(Point3D::new(1.0, 1.0, 1.0), Color::ORANGE)
            .with_user_data(serde_json::json!({"hoy": 12}));
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(json["geometry"]["type"], "Point3D");
        assert_eq!(json["user_data"]["hoy"], 12);

        let plain = serde_json::to_value(DisplayGeometry::colored(
            Point3D::default(),
            Color::ORANGE,
        ))
        .unwrap();
        assert!(plain.get("user_data").is_none());
    }
}
