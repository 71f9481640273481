//! Compass geometry drawn beneath sun paths and wind roses

use super::sunpath::Projection;
use crate::display::error::{DisplayError, Result};
use crate::geometry::{Arc3D, Point2D};
use serde::{Deserialize, Serialize};

/// Azimuths of the cardinal directions
pub const MAJOR_AZIMUTHS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
pub const MAJOR_TEXT: [&str; 4] = ["N", "E", "S", "W"];

/// Azimuths of the intercardinal directions
pub const MINOR_AZIMUTHS: [f64; 12] = [
    22.5, 45.0, 67.5, 112.5, 135.0, 157.5, 202.5, 225.0, 247.5, 292.5, 315.0, 337.5,
];
pub const MINOR_TEXT: [&str; 12] = [
    "NNE", "NE", "ENE", "ESE", "SE", "SSE", "SSW", "SW", "WSW", "WNW", "NW", "NNW",
];

/// Altitudes in degrees labelled on projected compasses
pub const ALTITUDES: [f64; 8] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

// Distances from the center as multiples of the radius
const BOUNDARY_SCALES: [f64; 3] = [1.0, 1.02, 1.15];
const MAJOR_TICK: (f64, f64) = (1.0, 1.2);
const MINOR_TICK: (f64, f64) = (1.02, 1.15);
const MAJOR_LABEL: f64 = 1.3;
const MINOR_LABEL: f64 = 1.22;

/// A circle in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle2D {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle2D {
    pub fn to_arc3d(&self, z: f64) -> Arc3D {
        Arc3D::circle_xy(&self.center, self.radius, z)
    }
}

/// A compass around a center point
///
/// Azimuths are measured clockwise from north, and north is rotated
/// counterclockwise from the Y axis by `north_angle` degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compass {
    pub radius: f64,
    pub center: Point2D,
    pub north_angle: f64,
}

impl Compass {
    pub fn new(radius: f64, center: Point2D, north_angle: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DisplayError::Translation(format!(
                "Compass radius must be positive, got {}",
                radius
            )));
        }
        Ok(Compass {
            radius,
            center,
            north_angle,
        })
    }

    /// Point at an azimuth and a distance from the center
    pub fn point_at(&self, azimuth: f64, distance: f64) -> Point2D {
        let angle = (self.north_angle - azimuth).to_radians();
        let north = Point2D::new(self.center.x, self.center.y + distance);
        north.rotate(angle, &self.center)
    }

    fn circle(&self, radius: f64) -> Circle2D {
        Circle2D {
            center: self.center,
            radius,
        }
    }

    fn ticks(&self, azimuths: &[f64], (inner, outer): (f64, f64)) -> Vec<[Point2D; 2]> {
        azimuths
            .iter()
            .map(|az| {
                [
                    self.point_at(*az, self.radius * inner),
                    self.point_at(*az, self.radius * outer),
                ]
            })
            .collect()
    }

    fn points(&self, azimuths: &[f64], scale: f64) -> Vec<Point2D> {
        azimuths
            .iter()
            .map(|az| self.point_at(*az, self.radius * scale))
            .collect()
    }

    /// The inner, middle and outer boundary circles
    pub fn all_boundary_circles(&self) -> Vec<Circle2D> {
        BOUNDARY_SCALES
            .iter()
            .map(|s| self.circle(self.radius * s))
            .collect()
    }

    pub fn major_azimuth_ticks(&self) -> Vec<[Point2D; 2]> {
        self.ticks(&MAJOR_AZIMUTHS, MAJOR_TICK)
    }

    /// Label positions for `MAJOR_TEXT`
    pub fn major_azimuth_points(&self) -> Vec<Point2D> {
        self.points(&MAJOR_AZIMUTHS, MAJOR_LABEL)
    }

    pub fn minor_azimuth_ticks(&self) -> Vec<[Point2D; 2]> {
        self.ticks(&MINOR_AZIMUTHS, MINOR_TICK)
    }

    /// Label positions for `MINOR_TEXT`
    pub fn minor_azimuth_points(&self) -> Vec<Point2D> {
        self.points(&MINOR_AZIMUTHS, MINOR_LABEL)
    }

    pub fn ticks_from_angles(&self, angles: &[f64]) -> Vec<[Point2D; 2]> {
        self.ticks(angles, MINOR_TICK)
    }

    pub fn label_points_from_angles(&self, angles: &[f64]) -> Vec<Point2D> {
        self.points(angles, MAJOR_LABEL)
    }

    /// Distance from the center of an altitude in a projection
    pub fn altitude_radius(&self, altitude: f64, projection: Projection) -> f64 {
        let alt = altitude.to_radians();
        match projection {
            Projection::Orthographic => self.radius * alt.cos(),
            Projection::Stereographic => self.radius * alt.cos() / (1.0 + alt.sin()),
        }
    }

    /// Circles for each of `ALTITUDES`
    pub fn altitude_circles(&self, projection: Projection) -> Vec<Circle2D> {
        ALTITUDES
            .iter()
            .map(|alt| self.circle(self.altitude_radius(*alt, projection)))
            .collect()
    }

    /// Label positions for each of `ALTITUDES`, along the north direction
    pub fn altitude_points(&self, projection: Projection) -> Vec<Point2D> {
        ALTITUDES
            .iter()
            .map(|alt| self.point_at(0.0, self.altitude_radius(*alt, projection)))
            .collect()
    }

    pub fn orthographic_altitude_circles(&self) -> Vec<Circle2D> {
        self.altitude_circles(Projection::Orthographic)
    }

    pub fn orthographic_altitude_points(&self) -> Vec<Point2D> {
        self.altitude_points(Projection::Orthographic)
    }

    pub fn stereographic_altitude_circles(&self) -> Vec<Circle2D> {
        self.altitude_circles(Projection::Stereographic)
    }

    pub fn stereographic_altitude_points(&self) -> Vec<Point2D> {
        self.altitude_points(Projection::Stereographic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: &Point2D, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "{:?} != ({}, {})",
            actual,
            x,
            y
        );
    }

    #[test]
    fn test_invalid_radius() {
        assert!(Compass::new(0.0, Point2D::default(), 0.0).is_err());
        assert!(Compass::new(-1.0, Point2D::default(), 0.0).is_err());
    }

    #[test]
    fn test_major_points() {
        let compass = Compass::new(100.0, Point2D::new(10.0, 0.0), 0.0).unwrap();
        let points = compass.major_azimuth_points();
        assert_point(&points[0], 10.0, 130.0); // N
        assert_point(&points[1], 140.0, 0.0); // E
        assert_point(&points[2], 10.0, -130.0); // S
        assert_point(&points[3], -120.0, 0.0); // W
    }

    #[test]
    fn test_north_angle_rotates_counterclockwise() {
        let compass = Compass::new(10.0, Point2D::default(), 90.0).unwrap();
        // North now points along -X
        assert_point(&compass.point_at(0.0, 10.0), -10.0, 0.0);
        assert_point(&compass.point_at(90.0, 10.0), 0.0, 10.0);
    }

    #[test]
    fn test_counts() {
        let compass = Compass::new(100.0, Point2D::default(), 0.0).unwrap();
        let radii: Vec<f64> = compass.all_boundary_circles().iter().map(|c| c.radius).collect();
        for (radius, expected) in radii.iter().zip([100.0, 102.0, 115.0]) {
            assert!((radius - expected).abs() < 1e-9);
        }
        assert_eq!(compass.major_azimuth_ticks().len(), MAJOR_TEXT.len());
        assert_eq!(compass.minor_azimuth_points().len(), MINOR_TEXT.len());
        assert_eq!(compass.ticks_from_angles(&[0.0, 45.0]).len(), 2);
        assert_eq!(compass.label_points_from_angles(&[0.0, 45.0]).len(), 2);
    }

    #[test]
    fn test_altitude_circles() {
        let compass = Compass::new(100.0, Point2D::default(), 0.0).unwrap();
        let ortho = compass.orthographic_altitude_circles();
        let stereo = compass.stereographic_altitude_circles();
        assert_eq!(ortho.len(), ALTITUDES.len());
        assert!((ortho[2].radius - 100.0 * 30f64.to_radians().cos()).abs() < 1e-9);
        // Stereographic circles sit inside the orthographic ones
        assert!(stereo.iter().zip(&ortho).all(|(s, o)| s.radius < o.radius));
        let points = compass.stereographic_altitude_points();
        assert_point(&points[0], 0.0, stereo[0].radius);
        assert_eq!(compass.orthographic_altitude_points().len(), ALTITUDES.len());
    }
}
