//! Wind profile translation

use super::styles::{ElementRole, StyleOverrides};
use crate::diagrams::windprofile::{ProfileAxis, ProfileLayout, WindProfile};
use crate::display::error::{DisplayError, Result};
use crate::display::DisplayGeometry;
use crate::geometry::{Geometry, HorizontalAlignment, Text3D, VerticalAlignment};
use crate::visualization::{
    AnalysisGeometry, ContextGeometry, LegendParameters, VisualizationData, VisualizationSet,
};
use serde::{Deserialize, Serialize};

/// Options for drawing a wind profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindProfileOptions {
    /// Wind speed at the weather station in m/s
    pub meteorological_wind_speed: f64,
    pub layout: ProfileLayout,
    /// Legend of the arrows; defaults to the standard legend
    pub legend_parameters: Option<LegendParameters>,
    /// Last speed on the speed axis; defaults to the fastest arrow, rounded
    pub max_speed: Option<f64>,
    /// Label the height axis in feet instead of meters
    pub feet_labels: bool,
    pub font: String,
}

impl Default for WindProfileOptions {
    fn default() -> Self {
        WindProfileOptions {
            meteorological_wind_speed: 5.0,
            layout: ProfileLayout::default(),
            legend_parameters: None,
            max_speed: None,
            feet_labels: false,
            font: "Arial".to_string(),
        }
    }
}

/// Line, arrow, ticks and labels of an axis
///
/// The last label is the axis title, drawn 1.25 times larger.
fn axis_geometry(
    axis: ProfileAxis,
    text_height: f64,
    tick_alignment: (HorizontalAlignment, VerticalAlignment),
    title_alignment: (HorizontalAlignment, VerticalAlignment),
    font: &str,
    styles: &StyleOverrides,
) -> Result<Vec<DisplayGeometry>> {
    let mut geometry = vec![
        styles.decorate(ElementRole::ChartAxis, axis.line),
        styles.decorate(ElementRole::ChartAxis, axis.arrow),
    ];
    geometry.extend(
        axis.ticks
            .into_iter()
            .map(|tick| styles.decorate(ElementRole::ChartAxis, tick)),
    );
    let title_index = axis.labels.len().saturating_sub(1);
    for (i, (label, plane)) in axis.labels.into_iter().enumerate() {
        let ((h, v), height) = if i == title_index {
            (title_alignment, text_height * 1.25)
        } else {
            (tick_alignment, text_height)
        };
        let text = Text3D::new(label, plane, height)?
            .with_font(font)
            .with_alignment(h, v);
        geometry.push(styles.decorate(ElementRole::ChartText, text));
    }
    Ok(geometry)
}

/// Translate a wind profile into a visualization set
///
/// The set holds the colored `Arrows`, the `Profile` outline, the
/// `Speed_Axis` and the `Height_Axis`, in that order.
pub fn wind_profile_to_vis_set(
    profile: &WindProfile,
    options: &WindProfileOptions,
    styles: &StyleOverrides,
) -> Result<VisualizationSet> {
    let met_ws = options.meteorological_wind_speed;
    let layout = &options.layout;
    if !met_ws.is_finite() {
        return Err(DisplayError::Translation(format!(
            "Meteorological wind speed must be a number, got {}",
            met_ws
        )));
    }
    let mut vis_set = VisualizationSet::new(format!("WindProfile_{}", met_ws as i64))?
        .with_display_name("Wind Profile");

    let (arrows, speeds) = profile.mesh_arrows(met_ws, layout)?;
    let max_speed = options
        .max_speed
        .unwrap_or_else(|| speeds.last().copied().unwrap_or(0.0).round());
    let legend = options.legend_parameters.clone().unwrap_or_default();
    let data = VisualizationData::new(speeds, legend)?.with_data_type("Wind Speed", "m/s");
    let arrows: Vec<Geometry> = arrows.into_iter().map(Geometry::from).collect();
    vis_set.add_group(AnalysisGeometry::new("Arrows", arrows, vec![data])?)?;

    let outline = profile.profile_polyline(met_ws, layout)?;
    vis_set.add_group(ContextGeometry::new(
        "Profile",
        vec![styles.decorate(ElementRole::ProfileLine, outline)],
    )?)?;

    let txt_h = layout.text_height();
    let speed_axis = axis_geometry(
        profile.speed_axis(max_speed, layout)?,
        txt_h,
        (HorizontalAlignment::Center, VerticalAlignment::Top),
        (HorizontalAlignment::Center, VerticalAlignment::Top),
        &options.font,
        styles,
    )?;
    vis_set.add_group(
        ContextGeometry::new("Speed_Axis", speed_axis)?.with_display_name("Speed Axis"),
    )?;

    let height_axis = axis_geometry(
        profile.height_axis(layout.vector_spacing * 2.0, layout, options.feet_labels)?,
        txt_h,
        (HorizontalAlignment::Right, VerticalAlignment::Middle),
        (HorizontalAlignment::Center, VerticalAlignment::Bottom),
        &options.font,
        styles,
    )?;
    vis_set.add_group(
        ContextGeometry::new("Height_Axis", height_axis)?.with_display_name("Height Axis"),
    )?;

    Ok(vis_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::windprofile::Terrain;
    use crate::display::{AttributeOverride, Color};
    use crate::visualization::MatchingMethod;

    #[test]
    fn test_wind_profile_groups() {
        let vis_set = wind_profile_to_vis_set(
            &WindProfile::default(),
            &WindProfileOptions::default(),
            &StyleOverrides::new(),
        )
        .unwrap();
        assert_eq!(vis_set.identifier, "WindProfile_5");
        assert_eq!(vis_set.display_name, "Wind Profile");
        assert_eq!(
            vis_set.group_names(),
            vec!["Arrows", "Profile", "Speed_Axis", "Height_Axis"]
        );

        let arrows = vis_set.group("Arrows").unwrap().as_analysis().unwrap();
        assert_eq!(arrows.geometry.len(), 15);
        let data = arrows.active().unwrap();
        assert_eq!(data.unit.as_deref(), Some("m/s"));
        assert_eq!(
            arrows.matching_method(data).unwrap(),
            MatchingMethod::Geometries
        );

        let speed_axis = vis_set.group("Speed_Axis").unwrap().as_context().unwrap();
        assert_eq!(speed_axis.display_name, "Speed Axis");
        match &speed_axis.geometry.last().unwrap().geometry {
            Geometry::Text3D(t) => {
                assert_eq!(t.text, "Wind Speed (m/s)");
                assert!((t.height - 1.25).abs() < 1e-9);
            }
            other => panic!("expected the axis title, got {}", other.type_name()),
        }
        assert!(vis_set.group("Height_Axis").is_some());
    }

    #[test]
    fn test_fixed_max_speed_and_styles() {
        let options = WindProfileOptions {
            max_speed: Some(3.0),
            feet_labels: true,
            ..Default::default()
        };
        let styles = StyleOverrides::new()
            .with_role(ElementRole::ProfileLine, AttributeOverride::color(Color::WHITE));
        let profile = WindProfile::new(Terrain::Water, Terrain::Country, 10.0).unwrap();
        let vis_set = wind_profile_to_vis_set(&profile, &options, &styles).unwrap();

        // Line, arrow, 4 ticks, 4 labels and the title
        assert_eq!(vis_set.group("Speed_Axis").unwrap().len(), 11);
        let outline = vis_set.group("Profile").unwrap().as_context().unwrap();
        assert_eq!(outline.geometry[0].attributes.color(), Color::WHITE);
        let height = vis_set.group("Height_Axis").unwrap().as_context().unwrap();
        assert!(height.geometry.iter().any(|g| match &g.geometry {
            Geometry::Text3D(t) => t.text == "Height (ft)",
            _ => false,
        }));
    }

    #[test]
    fn test_invalid_profile_fails() {
        let options = WindProfileOptions {
            meteorological_wind_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            wind_profile_to_vis_set(&WindProfile::default(), &options, &StyleOverrides::new()),
            Err(DisplayError::Translation(_))
        ));
    }
}
