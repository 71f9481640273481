//! Hourly plot translation
//!
//! An hourly plot set contains, in order:
//! - `Hour_Axis`: chart border, a line and label per requested hour
//! - `Month_Axis`: chart border, month boundaries and month names
//! - `Title`: data type and unit (optional)
//! - `Analysis_Data`: the grid mesh colored by the hourly values

use super::styles::{ElementRole, StyleOverrides};
use crate::diagrams::hourlyplot::{hour_label, DEFAULT_CUSTOM_HOURS, HOUR_LABELS};
use crate::diagrams::HourlyPlot;
use crate::display::attributes::{AttributeOverride, LineType};
use crate::display::error::Result;
use crate::display::{DisplayGeometry, DisplayMode};
use crate::geometry::{HorizontalAlignment, Plane, Text3D, VerticalAlignment};
use crate::visualization::{AnalysisGeometry, ContextGeometry, VisualizationData, VisualizationSet};
use serde::{Deserialize, Serialize};

/// Options for drawing an hourly plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPlotOptions {
    /// Hours of the day (0 to 24) drawn on the hour axis
    pub custom_hours: Vec<u32>,
    pub include_title: bool,
    pub font: String,
}

impl Default for HourlyPlotOptions {
    fn default() -> Self {
        HourlyPlotOptions {
            custom_hours: DEFAULT_CUSTOM_HOURS.to_vec(),
            include_title: true,
            font: "Arial".to_string(),
        }
    }
}

/// Translate an hourly plot into a visualization set
///
/// Hours in `HOUR_LABELS` get continuous lines and full-size labels; other
/// hours are dotted with smaller labels.
pub fn hourly_plot_to_vis_set(
    plot: &HourlyPlot,
    options: &HourlyPlotOptions,
    styles: &StyleOverrides,
) -> Result<VisualizationSet> {
    let mut vis_set =
        VisualizationSet::new(format!("Hourly_Plot_{}", plot.data_type.replace(' ', "_")))?;

    let txt_h = plot.text_height();
    let border = || styles.decorate(ElementRole::ChartBorder, plot.chart_border());
    let text = |label: &str, plane: Plane, height: f64, h, v| -> Result<DisplayGeometry> {
        let text = Text3D::new(label, plane, height)?
            .with_font(options.font.as_str())
            .with_alignment(h, v);
        Ok(styles.decorate(ElementRole::ChartText, text))
    };

    let hours = &options.custom_hours;
    let mut hour_lines = Vec::new();
    let mut hour_text = Vec::new();
    let lines = plot.hour_lines(hours)?;
    let points = plot.hour_label_points(hours)?;
    for ((hour, line), point) in hours.iter().zip(lines).zip(points) {
        let (line_type, height) = if HOUR_LABELS.contains(hour) {
            (LineType::Continuous, txt_h)
        } else {
            (LineType::Dotted, txt_h * 0.8)
        };
        let variation = AttributeOverride {
            line_type: Some(line_type),
            ..Default::default()
        };
        hour_lines.push(styles.decorate_with(ElementRole::ChartAxis, &variation, line));
        hour_text.push(text(
            hour_label(*hour).as_str(),
            Plane::xy(point),
            height,
            HorizontalAlignment::Right,
            VerticalAlignment::Middle,
        )?);
    }
    let hour_axis = std::iter::once(border())
        .chain(hour_lines)
        .chain(hour_text)
        .collect();
    vis_set.add_group(
        ContextGeometry::new("Hour_Axis", hour_axis)?.with_display_name("Hour Axis"),
    )?;

    let mut month_axis = vec![border()];
    month_axis.extend(
        plot.month_lines()
            .into_iter()
            .map(|line| styles.decorate(ElementRole::ChartAxis, line)),
    );
    for (name, point) in plot.month_labels() {
        month_axis.push(text(
            name,
            Plane::xy(point),
            txt_h,
            HorizontalAlignment::Center,
            VerticalAlignment::Top,
        )?);
    }
    vis_set.add_group(
        ContextGeometry::new("Month_Axis", month_axis)?.with_display_name("Month Axis"),
    )?;

    if options.include_title {
        let title = text(
            plot.title_text().as_str(),
            plot.lower_title_location(),
            txt_h,
            HorizontalAlignment::Left,
            VerticalAlignment::Bottom,
        )?;
        vis_set.add_group(ContextGeometry::new("Title", vec![title])?)?;
    }

    let data = VisualizationData::new(plot.values().to_vec(), plot.legend_parameters.clone())?
        .with_data_type(plot.data_type.as_str(), plot.unit.as_str());
    vis_set.add_group(
        AnalysisGeometry::new("Analysis_Data", vec![plot.colored_mesh()?.into()], vec![data])?
            .with_display_name(plot.data_type.as_str())
            .with_display_mode(DisplayMode::Surface),
    )?;

    tracing::debug!(
        "Hourly plot '{}' over {} days",
        vis_set.identifier,
        plot.day_count()
    );
    Ok(vis_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::Date;
    use crate::display::attributes::LineWidth;
    use crate::display::{Color, DisplayError};
    use crate::geometry::Geometry;
    use crate::visualization::MatchingMethod;

    fn plot() -> HourlyPlot {
        let values: Vec<f64> = (0..31 * 24).map(|i| (i % 24) as f64).collect();
        HourlyPlot::new(values, Date::new(1, 1).unwrap(), "Dry Bulb Temperature", "C").unwrap()
    }

    fn texts(group: &ContextGeometry) -> Vec<(String, f64)> {
        group
            .geometry
            .iter()
            .filter_map(|g| match &g.geometry {
                Geometry::Text3D(t) => Some((t.text.clone(), t.height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hourly_plot_groups() {
        let vis_set =
            hourly_plot_to_vis_set(&plot(), &HourlyPlotOptions::default(), &StyleOverrides::new())
                .unwrap();
        assert_eq!(vis_set.identifier, "Hourly_Plot_Dry_Bulb_Temperature");
        assert_eq!(
            vis_set.group_names(),
            vec!["Hour_Axis", "Month_Axis", "Title", "Analysis_Data"]
        );

        let hours = vis_set.group("Hour_Axis").unwrap().as_context().unwrap();
        assert_eq!(hours.display_name, "Hour Axis");
        // Border, 9 lines and 9 labels
        assert_eq!(hours.len(), 19);
        assert_eq!(hours.geometry[0].attributes.line_width(), LineWidth::Pixels(2.0));
        assert_eq!(hours.geometry[1].attributes.line_type(), LineType::Continuous);
        assert_eq!(hours.geometry[2].attributes.line_type(), LineType::Dotted);
        let labels = texts(hours);
        assert_eq!(labels[0].0, "12 AM");
        assert_eq!(labels[1].0, "3 AM");
        assert!(labels[1].1 < labels[0].1);

        // A single month has no boundary lines
        let months = vis_set.group("Month_Axis").unwrap().as_context().unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(texts(months)[0].0, "Jan");

        let title = vis_set.group("Title").unwrap().as_context().unwrap();
        assert_eq!(texts(title)[0].0, "Dry Bulb Temperature (C)");

        let mesh = vis_set.group("Analysis_Data").unwrap().as_analysis().unwrap();
        assert_eq!(mesh.display_name, "Dry Bulb Temperature");
        assert_eq!(mesh.display_mode, DisplayMode::Surface);
        assert_eq!(
            mesh.matching_method(mesh.active().unwrap()).unwrap(),
            MatchingMethod::Faces
        );
    }

    #[test]
    fn test_options_and_styles() {
        let options = HourlyPlotOptions {
            custom_hours: vec![6, 18],
            include_title: false,
            font: "Helvetica".to_string(),
        };
        let styles = StyleOverrides::new()
            .with_role(ElementRole::ChartText, AttributeOverride::color(Color::GRAY));
        let vis_set = hourly_plot_to_vis_set(&plot(), &options, &styles).unwrap();
        assert_eq!(
            vis_set.group_names(),
            vec!["Hour_Axis", "Month_Axis", "Analysis_Data"]
        );
        let hours = vis_set.group("Hour_Axis").unwrap().as_context().unwrap();
        assert_eq!(hours.len(), 5);
        assert_eq!(hours.geometry[4].attributes.color(), Color::GRAY);
        assert_eq!(hours.geometry[0].attributes.color(), Color::BLACK);
        match &hours.geometry[4].geometry {
            Geometry::Text3D(t) => assert_eq!(t.font, "Helvetica"),
            other => panic!("expected text, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_invalid_hours_fail() {
        let options = HourlyPlotOptions {
            custom_hours: vec![0, 30],
            ..Default::default()
        };
        assert!(matches!(
            hourly_plot_to_vis_set(&plot(), &options, &StyleOverrides::new()),
            Err(DisplayError::Translation(_))
        ));
    }
}
