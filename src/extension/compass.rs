//! Compass translation

use super::styles::{ElementRole, StyleOverrides};
use crate::diagrams::compass::{ALTITUDES, MAJOR_TEXT, MINOR_TEXT};
use crate::diagrams::{Circle2D, Compass, Projection};
use crate::display::attributes::{AttributeOverride, LineWidth};
use crate::display::error::Result;
use crate::display::DisplayGeometry;
use crate::geometry::{
    HorizontalAlignment, LineSegment3D, Plane, Point2D, Point3D, Text3D, Vector3D,
    VerticalAlignment,
};
use crate::visualization::{ContextGeometry, VisualizationSet};
use serde::{Deserialize, Serialize};

/// Options for drawing a compass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassOptions {
    /// Elevation of the compass plane
    pub z: f64,
    /// Angles labelled instead of the cardinal and intercardinal directions
    pub custom_angles: Option<Vec<f64>>,
    /// Draw altitude circles and labels for this projection
    pub projection: Option<Projection>,
    pub font: String,
}

impl Default for CompassOptions {
    fn default() -> Self {
        CompassOptions {
            z: 0.0,
            custom_angles: None,
            projection: None,
            font: "Arial".to_string(),
        }
    }
}

fn wide() -> AttributeOverride {
    AttributeOverride {
        line_width: Some(LineWidth::Pixels(2.0)),
        ..Default::default()
    }
}

/// Geometry of the compass in drawing order
///
/// Boundary circles, then azimuth ticks and labels (cardinal and
/// intercardinal, or the custom angles), then altitude circles and labels
/// when a projection is requested.
pub fn compass_geometry(
    compass: &Compass,
    options: &CompassOptions,
    styles: &StyleOverrides,
) -> Result<Vec<DisplayGeometry>> {
    let z = options.z;
    let major_height = compass.radius / 20.0;
    let minor_height = major_height / 2.0;
    let x_axis = Vector3D::X_AXIS.rotate_xy(compass.north_angle.to_radians());
    let no_variation = AttributeOverride::default();

    let circle = |role: ElementRole, c: &Circle2D, variation: &AttributeOverride| {
        styles.decorate_with(role, variation, c.to_arc3d(z))
    };
    let tick = |line: &[Point2D; 2], variation: &AttributeOverride| {
        styles.decorate_with(
            ElementRole::CompassTick,
            variation,
            LineSegment3D::from_points_2d(&line[0], &line[1], z),
        )
    };
    let text = |role: ElementRole, label: &str, at: &Point2D, height: f64, v: VerticalAlignment| {
        let plane = Plane::new(Vector3D::Z_AXIS, Point3D::from_point2d(at, z), Some(x_axis));
        Text3D::new(label, plane, height).map(|t| {
            styles.decorate(
                role,
                t.with_font(options.font.as_str())
                    .with_alignment(HorizontalAlignment::Center, v),
            )
        })
    };

    let mut result = Vec::new();
    for (i, c) in compass.all_boundary_circles().iter().enumerate() {
        let variation = if i == 0 { wide() } else { no_variation };
        result.push(circle(ElementRole::CompassBoundary, c, &variation));
    }

    match &options.custom_angles {
        None => {
            for line in compass.major_azimuth_ticks() {
                result.push(tick(&line, &wide()));
            }
            for (label, pt) in MAJOR_TEXT.into_iter().zip(compass.major_azimuth_points()) {
                result.push(text(
                    ElementRole::CompassText,
                    label,
                    &pt,
                    major_height,
                    VerticalAlignment::Middle,
                )?);
            }
            for line in compass.minor_azimuth_ticks() {
                result.push(tick(&line, &no_variation));
            }
            for (label, pt) in MINOR_TEXT.into_iter().zip(compass.minor_azimuth_points()) {
                result.push(text(
                    ElementRole::CompassText,
                    label,
                    &pt,
                    minor_height,
                    VerticalAlignment::Middle,
                )?);
            }
        }
        Some(angles) => {
            for line in compass.ticks_from_angles(angles) {
                result.push(tick(&line, &no_variation));
            }
            for (angle, pt) in angles.iter().zip(compass.label_points_from_angles(angles)) {
                result.push(text(
                    ElementRole::CompassText,
                    angle.to_string().as_str(),
                    &pt,
                    major_height,
                    VerticalAlignment::Middle,
                )?);
            }
        }
    }

    if let Some(projection) = options.projection {
        for c in compass.altitude_circles(projection) {
            result.push(circle(ElementRole::AltitudeCircle, &c, &no_variation));
        }
        for (alt, pt) in ALTITUDES.into_iter().zip(compass.altitude_points(projection)) {
            result.push(text(
                ElementRole::AltitudeText,
                alt.to_string().as_str(),
                &pt,
                minor_height,
                VerticalAlignment::Top,
            )?);
        }
    }

    Ok(result)
}

/// The compass as a single "Compass" context group
pub fn compass_group(
    compass: &Compass,
    options: &CompassOptions,
    styles: &StyleOverrides,
) -> Result<ContextGeometry> {
    ContextGeometry::new("Compass", compass_geometry(compass, options, styles)?)
}

/// Translate a compass into a visualization set with one "Compass" group
pub fn compass_to_vis_set(
    compass: &Compass,
    options: &CompassOptions,
    styles: &StyleOverrides,
) -> Result<VisualizationSet> {
    let mut vis_set = VisualizationSet::new("Compass")?;
    vis_set.add_group(compass_group(compass, options, styles)?)?;
    Ok(vis_set)
}
