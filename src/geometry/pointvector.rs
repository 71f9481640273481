//! Points and vectors in 2D and 3D space

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A point in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    pub fn distance_to_point(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Rotate counterclockwise around an origin by an angle in radians
    pub fn rotate(&self, angle: f64, origin: &Point2D) -> Point2D {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point2D {
            x: origin.x + dx * cos - dy * sin,
            y: origin.y + dx * sin + dy * cos,
        }
    }
}

/// A direction and magnitude in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub const X_AXIS: Vector3D = Vector3D { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y_AXIS: Vector3D = Vector3D { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z_AXIS: Vector3D = Vector3D { x: 0.0, y: 0.0, z: 1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction (zero vectors are returned unchanged)
    pub fn normalize(&self) -> Vector3D {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            *self * (1.0 / mag)
        }
    }

    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Rotate counterclockwise in the world XY plane by an angle in radians
    pub fn rotate_xy(&self, angle: f64) -> Vector3D {
        let (sin, cos) = angle.sin_cos();
        Vector3D {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Vector3D {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    pub fn from_point2d(point: &Point2D, z: f64) -> Self {
        Point3D::new(point.x, point.y, z)
    }

    pub fn move_by(&self, vector: &Vector3D) -> Point3D {
        Point3D::new(self.x + vector.x, self.y + vector.y, self.z + vector.z)
    }

    pub fn distance_to_point(&self, other: &Point3D) -> f64 {
        (*self - *other).magnitude()
    }

    /// Position vector of this point relative to the world origin
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Point3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Point3D {
        self.move_by(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_vector_cross_and_dot() {
        let z = Vector3D::X_AXIS.cross(&Vector3D::Y_AXIS);
        assert_eq!(z, Vector3D::Z_AXIS);
        assert_eq!(Vector3D::X_AXIS.dot(&Vector3D::Y_AXIS), 0.0);
        assert_eq!(Vector3D::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[test]
    fn test_rotate_xy_quarter_turn() {
        let rotated = Vector3D::Y_AXIS.rotate_xy(FRAC_PI_2);
        assert!((rotated.x + 1.0).abs() < 1e-12);
        assert!(rotated.y.abs() < 1e-12);
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        let moved = p + Vector3D::new(1.0, 1.0, 1.0);
        assert_eq!(moved, Point3D::new(2.0, 3.0, 4.0));
        assert_eq!(moved - p, Vector3D::new(1.0, 1.0, 1.0));
        assert!((p.distance_to_point(&moved) - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_point2d_rotate() {
        let p = Point2D::new(2.0, 1.0).rotate(FRAC_PI_2, &Point2D::new(1.0, 1.0));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
