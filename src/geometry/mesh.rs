//! Surface-like geometry: meshes and spheres

use super::pointvector::{Point3D, Vector3D};
use crate::display::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};

/// A mesh of triangular and quadrilateral faces
///
/// Deserialization goes through `Mesh3D::new`, so parsed faces are checked too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Mesh3DRepr")]
pub struct Mesh3D {
    pub vertices: Vec<Point3D>,
    pub faces: Vec<Vec<usize>>,
}

#[derive(Deserialize)]
struct Mesh3DRepr {
    vertices: Vec<Point3D>,
    faces: Vec<Vec<usize>>,
}

impl TryFrom<Mesh3DRepr> for Mesh3D {
    type Error = DisplayError;

    fn try_from(value: Mesh3DRepr) -> Result<Self> {
        Mesh3D::new(value.vertices, value.faces)
    }
}

impl Mesh3D {
    /// Create a mesh, checking that every face has 3 or 4 valid vertex indices
    pub fn new(vertices: Vec<Point3D>, faces: Vec<Vec<usize>>) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            if face.len() != 3 && face.len() != 4 {
                return Err(DisplayError::InvalidGeometry(format!(
                    "Mesh face {} has {} vertices, expected 3 or 4",
                    i,
                    face.len()
                )));
            }
            if let Some(bad) = face.iter().find(|&&idx| idx >= vertices.len()) {
                return Err(DisplayError::InvalidGeometry(format!(
                    "Mesh face {} references vertex {} but the mesh has {} vertices",
                    i,
                    bad,
                    vertices.len()
                )));
            }
        }
        Ok(Mesh3D { vertices, faces })
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A sphere around a center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Point3D,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Point3D, radius: f64) -> Self {
        Sphere { center, radius }
    }

    pub fn min(&self) -> Point3D {
        self.center + Vector3D::new(-self.radius, -self.radius, -self.radius)
    }

    pub fn max(&self) -> Point3D {
        self.center + Vector3D::new(self.radius, self.radius, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Vec<Point3D> {
        vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(1.0, 1.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_mesh_valid() {
        let mesh = Mesh3D::new(unit_quad(), vec![vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_mesh_rejects_bad_faces() {
        let too_many = Mesh3D::new(unit_quad(), vec![vec![0, 1, 2, 3, 0]]);
        assert!(matches!(too_many, Err(DisplayError::InvalidGeometry(_))));

        let out_of_range = Mesh3D::new(unit_quad(), vec![vec![0, 1, 9]]);
        assert!(matches!(out_of_range, Err(DisplayError::InvalidGeometry(_))));
    }

    #[test]
    fn test_mesh_deserialization_checks_faces() {
        let good: Mesh3D = serde_json::from_value(serde_json::json!({
            "vertices": [
                {"x": 0.0, "y": 0.0, "z": 0.0},
                {"x": 1.0, "y": 0.0, "z": 0.0},
                {"x": 0.0, "y": 1.0, "z": 0.0}
            ],
            "faces": [[0, 1, 2]]
        }))
        .unwrap();
        assert_eq!(good.face_count(), 1);

        let bad = serde_json::from_value::<Mesh3D>(serde_json::json!({
            "vertices": [{"x": 0.0, "y": 0.0, "z": 0.0}],
            "faces": [[0, 1, 7]]
        }));
        assert!(bad.unwrap_err().to_string().contains("references vertex"));
    }

    #[test]
    fn test_sphere_bounds() {
        let sphere = Sphere::new(Point3D::new(1.0, 1.0, 1.0), 0.5);
        assert_eq!(sphere.min(), Point3D::new(0.5, 0.5, 0.5));
        assert_eq!(sphere.max(), Point3D::new(1.5, 1.5, 1.5));
    }
}
