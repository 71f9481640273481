//! Planes and curve-like geometry

use super::pointvector::{Point2D, Point3D, Vector3D};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A plane defined by an origin, a normal and an X axis within the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub n: Vector3D,
    pub o: Point3D,
    pub x: Vector3D,
}

impl Plane {
    /// Create a plane, deriving the X axis from the normal when not given
    ///
    /// For horizontal planes the default X axis is the world X axis, otherwise
    /// it is the horizontal direction perpendicular to the normal.
    pub fn new(n: Vector3D, o: Point3D, x: Option<Vector3D>) -> Self {
        let n = n.normalize();
        let x = match x {
            Some(x) => x.normalize(),
            None if n.x == 0.0 && n.y == 0.0 => Vector3D::X_AXIS,
            None => Vector3D::new(n.y, -n.x, 0.0).normalize(),
        };
        Plane { n, o, x }
    }

    /// World XY plane moved to an origin
    pub fn xy(o: Point3D) -> Self {
        Plane::new(Vector3D::Z_AXIS, o, None)
    }

    pub fn y(&self) -> Vector3D {
        self.n.cross(&self.x)
    }

    /// Convert a point in this plane's 2D coordinate system into 3D space
    pub fn xy_to_xyz(&self, point: &Point2D) -> Point3D {
        self.o + self.x * point.x + self.y() * point.y
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::xy(Point3D::default())
    }
}

/// A straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment3D {
    pub p1: Point3D,
    pub p2: Point3D,
}

impl LineSegment3D {
    pub fn new(p1: Point3D, p2: Point3D) -> Self {
        LineSegment3D { p1, p2 }
    }

    /// Segment in the XY plane at a given elevation
    pub fn from_points_2d(p1: &Point2D, p2: &Point2D, z: f64) -> Self {
        LineSegment3D::new(Point3D::from_point2d(p1, z), Point3D::from_point2d(p2, z))
    }
}

/// An open chain of connected points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline3D {
    pub vertices: Vec<Point3D>,
}

impl Polyline3D {
    pub fn new(vertices: Vec<Point3D>) -> Self {
        Polyline3D { vertices }
    }

    /// Map 2D points in a plane's coordinate system into a 3D polyline
    pub fn from_points_2d(points: &[Point2D], plane: &Plane) -> Self {
        Polyline3D::new(points.iter().map(|p| plane.xy_to_xyz(p)).collect())
    }

    /// Closed outline of a polygon (first vertex repeated at the end)
    pub fn from_polygon_2d(points: &[Point2D], plane: &Plane) -> Self {
        let mut polyline = Polyline3D::from_points_2d(points, plane);
        if let Some(first) = polyline.vertices.first().copied() {
            polyline.vertices.push(first);
        }
        polyline
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// A circular arc in a plane, running counterclockwise from `a1` to `a2`
///
/// Angles are in radians, measured from the plane's X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc3D {
    pub plane: Plane,
    pub radius: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Arc3D {
    pub fn new(plane: Plane, radius: f64, a1: f64, a2: f64) -> Self {
        Arc3D {
            plane,
            radius,
            a1,
            a2,
        }
    }

    /// Full circle around the plane origin
    pub fn circle(plane: Plane, radius: f64) -> Self {
        Arc3D::new(plane, radius, 0.0, TAU)
    }

    /// Horizontal circle around a 2D center at a given elevation
    pub fn circle_xy(center: &Point2D, radius: f64, z: f64) -> Self {
        Arc3D::circle(Plane::xy(Point3D::from_point2d(center, z)), radius)
    }

    /// Arc through three points, starting at `p1` and ending at `p2`
    ///
    /// When `circle` is true the full circle through the points is returned.
    /// Returns None when the points are collinear.
    pub fn from_start_mid_end(p1: Point3D, m: Point3D, p2: Point3D, circle: bool) -> Option<Self> {
        let a = m - p1;
        let b = p2 - p1;
        let n = a.cross(&b);
        let n_sq = n.dot(&n);
        if n_sq < 1e-18 {
            return None;
        }

        let offset = (b * a.dot(&a) - a * b.dot(&b)).cross(&n) * (1.0 / (2.0 * n_sq));
        let center = p1 + offset;
        let radius = offset.magnitude();
        let plane = Plane::new(n, center, Some(p1 - center));

        if circle {
            return Some(Arc3D::circle(plane, radius));
        }
        let a2 = plane_angle(&plane, &p2);
        Some(Arc3D::new(plane, radius, 0.0, a2))
    }

    pub fn is_circle(&self) -> bool {
        (self.a2 - self.a1 - TAU).abs() < 1e-9
    }

    pub fn angle(&self) -> f64 {
        self.a2 - self.a1
    }

    pub fn point_at_angle(&self, angle: f64) -> Point3D {
        let (sin, cos) = angle.sin_cos();
        self.plane.o + self.plane.x * (self.radius * cos) + self.plane.y() * (self.radius * sin)
    }

    pub fn p1(&self) -> Point3D {
        self.point_at_angle(self.a1)
    }

    pub fn p2(&self) -> Point3D {
        self.point_at_angle(self.a2)
    }

    pub fn midpoint(&self) -> Point3D {
        self.point_at_angle((self.a1 + self.a2) / 2.0)
    }

    /// Points dividing the arc into equal segments (`divisions + 1` points)
    pub fn subdivide(&self, divisions: usize) -> Vec<Point3D> {
        let divisions = divisions.max(1);
        let step = self.angle() / divisions as f64;
        (0..=divisions)
            .map(|i| self.point_at_angle(self.a1 + step * i as f64))
            .collect()
    }
}

/// Counterclockwise angle of a point around the plane origin in [0, 2π)
fn plane_angle(plane: &Plane, point: &Point3D) -> f64 {
    let v = *point - plane.o;
    let angle = v.dot(&plane.y()).atan2(v.dot(&plane.x));
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}
