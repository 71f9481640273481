//! Wind rose translation

use super::compass::{compass_group, CompassOptions};
use super::styles::{ElementRole, StyleOverrides};
use crate::diagrams::WindRose;
use crate::display::attributes::AttributeOverride;
use crate::display::error::Result;
use crate::geometry::{LineSegment3D, Plane, Point3D, Polyline3D};
use crate::visualization::{AnalysisGeometry, ContextGeometry, VisualizationData, VisualizationSet};

/// Identifier of a wind rose set, suffixed with the city when known
fn set_identifier(windrose: &WindRose) -> String {
    match windrose.metadata.get("city") {
        Some(city) if !city.trim().is_empty() => {
            format!("Wind_Rose_{}", city.trim().replace(' ', "_"))
        }
        _ => "Wind_Rose".to_string(),
    }
}

/// Translate a wind rose into a visualization set
///
/// The set holds the compass, the orientation lines, all frequency rings but
/// the outermost (which the compass already draws) and the colored petal mesh.
pub fn wind_rose_to_vis_set(
    windrose: &WindRose,
    z: f64,
    styles: &StyleOverrides,
) -> Result<VisualizationSet> {
    let mut vis_set = VisualizationSet::new(set_identifier(windrose))?;

    let compass_options = CompassOptions {
        z,
        ..Default::default()
    };
    vis_set.add_group(compass_group(&windrose.compass()?, &compass_options, styles)?)?;

    let orientation = windrose
        .orientation_lines()?
        .iter()
        .map(|line| {
            styles.decorate(
                ElementRole::OrientationLine,
                LineSegment3D::from_points_2d(&line[0], &line[1], z),
            )
        })
        .collect();
    vis_set.add_group(
        ContextGeometry::new("Orientation_Lines", orientation)?
            .with_display_name("Orientation Lines"),
    )?;

    let plane = Plane::xy(Point3D::new(0.0, 0.0, z));
    let rings = windrose.frequency_lines()?;
    let frequency = rings[..rings.len().saturating_sub(1)]
        .iter()
        .map(|ring| {
            styles.decorate(
                ElementRole::FrequencyLine,
                Polyline3D::from_polygon_2d(ring, &plane),
            )
        })
        .collect();
    vis_set.add_group(
        ContextGeometry::new("Frequency_Lines", frequency)?.with_display_name("Frequency Lines"),
    )?;

    let mesh = windrose.colored_mesh(z)?;
    let data = VisualizationData::new(windrose.color_array()?, windrose.legend_parameters.clone())?
        .with_data_type(windrose.data_type.as_str(), windrose.unit.as_str());
    let display_mode = styles
        .resolve(ElementRole::RoseMesh, &AttributeOverride::default())
        .display_mode();
    vis_set.add_group(
        AnalysisGeometry::new("Analysis_Data", vec![mesh.into()], vec![data])?
            .with_display_name(windrose.data_type.as_str())
            .with_display_mode(display_mode),
    )?;

    Ok(vis_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::attributes::{DisplayMode, LineType};
    use crate::display::DisplayError;
    use crate::visualization::MatchingMethod;

    fn rose() -> WindRose {
        let directions: Vec<f64> = (0..120).map(|i| (i * 37 % 360) as f64).collect();
        let values: Vec<f64> = (0..120).map(|i| (i % 9) as f64).collect();
        WindRose::new(directions, values)
            .unwrap()
            .with_direction_count(8)
            .unwrap()
            .with_frequency_hours(5.0)
            .unwrap()
    }

    #[test]
    fn test_wind_rose_groups() {
        let windrose = rose().with_metadata("city", "San Francisco");
        let vis_set = wind_rose_to_vis_set(&windrose, 1.0, &StyleOverrides::new()).unwrap();
        assert_eq!(vis_set.identifier, "Wind_Rose_San_Francisco");
        assert_eq!(
            vis_set.group_names(),
            vec!["Compass", "Orientation_Lines", "Frequency_Lines", "Analysis_Data"]
        );

        let spokes = vis_set.group("Orientation_Lines").unwrap().as_context().unwrap();
        assert_eq!(spokes.len(), 8);
        assert_eq!(spokes.display_name, "Orientation Lines");
        assert!(spokes
            .geometry
            .iter()
            .all(|g| g.attributes.line_type() == LineType::Dotted));

        let rings = vis_set.group("Frequency_Lines").unwrap();
        assert_eq!(rings.len(), windrose.frequency_intervals().unwrap() - 1);

        let mesh = vis_set.group("Analysis_Data").unwrap().as_analysis().unwrap();
        assert_eq!(mesh.display_name, "Wind Speed");
        assert_eq!(mesh.display_mode, DisplayMode::SurfaceWithEdges);
        assert_eq!(
            mesh.matching_method(mesh.active().unwrap()).unwrap(),
            MatchingMethod::Faces
        );
    }

    #[test]
    fn test_wind_rose_without_city() {
        let vis_set = wind_rose_to_vis_set(&rose(), 0.0, &StyleOverrides::new()).unwrap();
        assert_eq!(vis_set.identifier, "Wind_Rose");
        let first = wind_rose_to_vis_set(&rose(), 0.0, &StyleOverrides::new()).unwrap();
        assert_eq!(vis_set, first);
    }

    #[test]
    fn test_mesh_display_mode_override() {
        let styles = StyleOverrides::new().with_role(
            ElementRole::RoseMesh,
            AttributeOverride {
                display_mode: Some(DisplayMode::Wireframe),
                ..Default::default()
            },
        );
        let vis_set = wind_rose_to_vis_set(&rose(), 0.0, &styles).unwrap();
        let mesh = vis_set.group("Analysis_Data").unwrap().as_analysis().unwrap();
        assert_eq!(mesh.display_mode, DisplayMode::Wireframe);
    }

    #[test]
    fn test_too_many_rings_fails() {
        let windrose = rose().with_frequency_hours(1e-6).unwrap();
        assert!(matches!(
            wind_rose_to_vis_set(&windrose, 0.0, &StyleOverrides::new()),
            Err(DisplayError::Translation(_))
        ));
    }

    #[test]
    fn test_empty_wind_rose_fails() {
        let windrose = WindRose::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            wind_rose_to_vis_set(&windrose, 0.0, &StyleOverrides::new()),
            Err(DisplayError::Translation(_))
        ));
    }
}
