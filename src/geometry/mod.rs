//! Geometry primitives carried by display objects
//!
//! Only the primitives needed to describe diagram output are provided here;
//! geometric computation beyond that belongs to the caller's geometry library.
//!
//! Structure:
//! - `pointvector.rs`: points and vectors
//! - `curves.rs`: planes, line segments, polylines and arcs
//! - `mesh.rs`: meshes and spheres
//! - `text.rs`: text placed with a plane

pub mod curves;
pub mod mesh;
pub mod pointvector;
pub mod text;

pub use curves::{Arc3D, LineSegment3D, Plane, Polyline3D};
pub use mesh::{Mesh3D, Sphere};
pub use pointvector::{Point2D, Point3D, Vector3D};
pub use text::{HorizontalAlignment, Text3D, VerticalAlignment};

use serde::{Deserialize, Serialize};

/// Any geometry object that can be decorated and displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point3D(Point3D),
    LineSegment3D(LineSegment3D),
    Polyline3D(Polyline3D),
    Arc3D(Arc3D),
    Mesh3D(Mesh3D),
    Sphere(Sphere),
    Text3D(Text3D),
}

impl Geometry {
    /// Short type name used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point3D(_) => "Point3D",
            Geometry::LineSegment3D(_) => "LineSegment3D",
            Geometry::Polyline3D(_) => "Polyline3D",
            Geometry::Arc3D(_) => "Arc3D",
            Geometry::Mesh3D(_) => "Mesh3D",
            Geometry::Sphere(_) => "Sphere",
            Geometry::Text3D(_) => "Text3D",
        }
    }

    /// Whether this geometry has a surface (as opposed to points and curves)
    pub fn is_surface(&self) -> bool {
        matches!(self, Geometry::Mesh3D(_) | Geometry::Sphere(_))
    }

    pub fn as_mesh(&self) -> Option<&Mesh3D> {
        match self {
            Geometry::Mesh3D(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Points that enclose this geometry, used for bounding boxes
    pub fn extent_points(&self) -> Vec<Point3D> {
        match self {
            Geometry::Point3D(p) => vec![*p],
            Geometry::LineSegment3D(l) => vec![l.p1, l.p2],
            Geometry::Polyline3D(p) => p.vertices.clone(),
            Geometry::Arc3D(a) => a.subdivide(36),
            Geometry::Mesh3D(m) => m.vertices.clone(),
            Geometry::Sphere(s) => vec![s.min(), s.max()],
            Geometry::Text3D(t) => vec![t.plane.o],
        }
    }
}

impl From<Point3D> for Geometry {
    fn from(value: Point3D) -> Self {
        Geometry::Point3D(value)
    }
}

impl From<LineSegment3D> for Geometry {
    fn from(value: LineSegment3D) -> Self {
        Geometry::LineSegment3D(value)
    }
}

impl From<Polyline3D> for Geometry {
    fn from(value: Polyline3D) -> Self {
        Geometry::Polyline3D(value)
    }
}

impl From<Arc3D> for Geometry {
    fn from(value: Arc3D) -> Self {
        Geometry::Arc3D(value)
    }
}

impl From<Mesh3D> for Geometry {
    fn from(value: Mesh3D) -> Self {
        Geometry::Mesh3D(value)
    }
}

impl From<Sphere> for Geometry {
    fn from(value: Sphere) -> Self {
        Geometry::Sphere(value)
    }
}

impl From<Text3D> for Geometry {
    fn from(value: Text3D) -> Self {
        Geometry::Text3D(value)
    }
}

/// Minimum and maximum corners of the box around a set of geometry
///
/// Returns None when there is no geometry.
pub fn bounding_box<'a, I>(geometry: I) -> Option<(Point3D, Point3D)>
where
    I: IntoIterator<Item = &'a Geometry>,
{
    let mut bounds: Option<(Point3D, Point3D)> = None;
    for point in geometry.into_iter().flat_map(|g| g.extent_points()) {
        bounds = Some(match bounds {
            None => (point, point),
            Some((min, max)) => (
                Point3D::new(min.x.min(point.x), min.y.min(point.y), min.z.min(point.z)),
                Point3D::new(max.x.max(point.x), max.y.max(point.y), max.z.max(point.z)),
            ),
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let geos = vec![
            Geometry::from(Point3D::new(1.0, 2.0, 3.0)),
            Geometry::from(LineSegment3D::new(
                Point3D::new(-1.0, 0.0, 0.0),
                Point3D::new(0.0, 5.0, 1.0),
            )),
            Geometry::from(Sphere::new(Point3D::new(0.0, 0.0, 0.0), 2.0)),
        ];
        let (min, max) = bounding_box(&geos).unwrap();
        assert_eq!(min, Point3D::new(-2.0, -2.0, -2.0));
        assert_eq!(max, Point3D::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        let geos: Vec<Geometry> = Vec::new();
        assert!(bounding_box(&geos).is_none());
    }

    #[test]
    fn test_geometry_serializes_with_type_tag() {
        let geo = Geometry::from(Point3D::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(json["type"], "Point3D");
        assert_eq!(json["x"], 1.0);

        let back: Geometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, geo);
        assert!(!back.is_surface());
    }
}
