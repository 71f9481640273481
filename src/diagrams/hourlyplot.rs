//! Hourly plot: one colored cell per hour of each plotted day
//!
//! Days run along X and the hours of each day along Y, from midnight at the
//! bottom of the chart to midnight at the top.

use super::dt::{month_offset, Date, DAYS_IN_MONTH, MONTH_NAMES};
use crate::display::error::{DisplayError, Result};
use crate::geometry::{LineSegment3D, Mesh3D, Plane, Point3D, Polyline3D, Vector3D};
use crate::visualization::LegendParameters;
use serde::{Deserialize, Serialize};

/// Hours drawn as major lines with full-size labels
pub const HOUR_LABELS: [u32; 5] = [0, 6, 12, 18, 24];

/// Hours labelled on the hour axis unless the caller picks others
pub const DEFAULT_CUSTOM_HOURS: [u32; 9] = [0, 3, 6, 9, 12, 15, 18, 21, 24];

/// Label of an hour of the day on a 12-hour clock
pub fn hour_label(hour: u32) -> String {
    match hour % 24 {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

/// Hourly values of a run of consecutive days laid out as a colored grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPlot {
    values: Vec<f64>,
    start_doy: u32,
    x_dim: f64,
    y_dim: f64,
    pub base_point: Point3D,
    pub data_type: String,
    pub unit: String,
    pub legend_parameters: LegendParameters,
}

impl HourlyPlot {
    /// Plot 24 values per day, starting at midnight of `start`
    pub fn new(
        values: Vec<f64>,
        start: Date,
        data_type: impl Into<String>,
        unit: impl Into<String>,
    ) -> Result<Self> {
        if values.is_empty() || values.len() % 24 != 0 {
            return Err(DisplayError::Translation(format!(
                "Hourly plot needs whole days of 24 values, got {} values",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DisplayError::Translation(
                "Hourly plot data contains non-finite numbers".to_string(),
            ));
        }
        let days = (values.len() / 24) as u32;
        if start.doy() - 1 + days > 365 {
            return Err(DisplayError::Translation(format!(
                "{} days starting {} run past the end of the year",
                days, start
            )));
        }
        Ok(HourlyPlot {
            values,
            start_doy: start.doy(),
            x_dim: 1.0,
            y_dim: 4.0,
            base_point: Point3D::default(),
            data_type: data_type.into(),
            unit: unit.into(),
            legend_parameters: LegendParameters::default(),
        })
    }

    /// Width of each day and height of each hour
    pub fn with_dimensions(mut self, x_dim: f64, y_dim: f64) -> Result<Self> {
        for (name, dim) in [("x_dim", x_dim), ("y_dim", y_dim)] {
            if !dim.is_finite() || dim <= 0.0 {
                return Err(DisplayError::Translation(format!(
                    "Hourly plot {} must be positive, got {}",
                    name, dim
                )));
            }
        }
        self.x_dim = x_dim;
        self.y_dim = y_dim;
        Ok(self)
    }

    pub fn with_base_point(mut self, base_point: Point3D) -> Self {
        self.base_point = base_point;
        self
    }

    pub fn with_legend_parameters(mut self, legend_parameters: LegendParameters) -> Self {
        self.legend_parameters = legend_parameters;
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn day_count(&self) -> u32 {
        (self.values.len() / 24) as u32
    }

    pub fn start_doy(&self) -> u32 {
        self.start_doy
    }

    pub fn x_dim(&self) -> f64 {
        self.x_dim
    }

    pub fn y_dim(&self) -> f64 {
        self.y_dim
    }

    /// Height of hour and month labels
    pub fn text_height(&self) -> f64 {
        self.y_dim * 1.5
    }

    fn width(&self) -> f64 {
        self.day_count() as f64 * self.x_dim
    }

    fn height(&self) -> f64 {
        24.0 * self.y_dim
    }

    fn at(&self, x: f64, y: f64) -> Point3D {
        self.base_point + Vector3D::new(x, y, 0.0)
    }

    /// Closed rectangle around the grid
    pub fn chart_border(&self) -> Polyline3D {
        let (w, h) = (self.width(), self.height());
        Polyline3D::new(vec![
            self.at(0.0, 0.0),
            self.at(w, 0.0),
            self.at(w, h),
            self.at(0.0, h),
            self.at(0.0, 0.0),
        ])
    }

    /// Grid mesh with one face per value, in the order of the values
    pub fn colored_mesh(&self) -> Result<Mesh3D> {
        let days = self.day_count() as usize;
        let vertices = (0..=days)
            .flat_map(|d| (0..=24).map(move |h| (d, h)))
            .map(|(d, h)| self.at(d as f64 * self.x_dim, h as f64 * self.y_dim))
            .collect();
        let index = |d: usize, h: usize| d * 25 + h;
        let faces = (0..days)
            .flat_map(|d| (0..24).map(move |h| (d, h)))
            .map(|(d, h)| {
                vec![
                    index(d, h),
                    index(d + 1, h),
                    index(d + 1, h + 1),
                    index(d, h + 1),
                ]
            })
            .collect();
        Mesh3D::new(vertices, faces)
    }

    fn check_hours(hours: &[u32]) -> Result<()> {
        match hours.iter().find(|h| **h > 24) {
            Some(bad) => Err(DisplayError::Translation(format!(
                "Hour {} is outside the day (0 to 24)",
                bad
            ))),
            None => Ok(()),
        }
    }

    /// Horizontal lines across the chart at each hour
    pub fn hour_lines(&self, hours: &[u32]) -> Result<Vec<LineSegment3D>> {
        Self::check_hours(hours)?;
        Ok(hours
            .iter()
            .map(|h| {
                let y = *h as f64 * self.y_dim;
                LineSegment3D::new(self.at(0.0, y), self.at(self.width(), y))
            })
            .collect())
    }

    /// Anchors of the hour labels, left of the chart
    pub fn hour_label_points(&self, hours: &[u32]) -> Result<Vec<Point3D>> {
        Self::check_hours(hours)?;
        let x = -self.text_height() * 0.5;
        Ok(hours
            .iter()
            .map(|h| self.at(x, *h as f64 * self.y_dim))
            .collect())
    }

    /// (month index, offset of its first plotted day, plotted days) of each
    /// month the chart covers
    fn month_spans(&self) -> Vec<(usize, u32, u32)> {
        let first = self.start_doy;
        let last = first + self.day_count() - 1;
        (1..=12u32)
            .filter_map(|month| {
                let start = month_offset(month) + 1;
                let end = start + DAYS_IN_MONTH[(month - 1) as usize] - 1;
                let (lo, hi) = (start.max(first), end.min(last));
                (lo <= hi).then_some(((month - 1) as usize, lo - first, hi - lo + 1))
            })
            .collect()
    }

    /// Vertical lines where a new month starts inside the chart
    pub fn month_lines(&self) -> Vec<LineSegment3D> {
        self.month_spans()
            .iter()
            .filter(|(_, offset, _)| *offset > 0)
            .map(|(_, offset, _)| {
                let x = *offset as f64 * self.x_dim;
                LineSegment3D::new(self.at(x, 0.0), self.at(x, self.height()))
            })
            .collect()
    }

    /// Month names with their anchors, centered below each month
    pub fn month_labels(&self) -> Vec<(&'static str, Point3D)> {
        let y = -self.text_height() * 0.5;
        self.month_spans()
            .iter()
            .map(|(month, offset, days)| {
                let x = (*offset as f64 + *days as f64 / 2.0) * self.x_dim;
                (MONTH_NAMES[*month], self.at(x, y))
            })
            .collect()
    }

    pub fn title_text(&self) -> String {
        format!("{} ({})", self.data_type, self.unit)
    }

    /// Plane of the title, below the month labels
    pub fn lower_title_location(&self) -> Plane {
        Plane::xy(self.at(0.0, -self.text_height() * 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_plot() -> HourlyPlot {
        let values: Vec<f64> = (0..8760).map(|i| (i % 24) as f64).collect();
        HourlyPlot::new(values, Date::new(1, 1).unwrap(), "Dry Bulb Temperature", "C").unwrap()
    }

    #[test]
    fn test_invalid_data() {
        let jan1 = Date::new(1, 1).unwrap();
        assert!(HourlyPlot::new(Vec::new(), jan1, "T", "C").is_err());
        assert!(HourlyPlot::new(vec![1.0; 25], jan1, "T", "C").is_err());
        assert!(HourlyPlot::new(vec![f64::NAN; 24], jan1, "T", "C").is_err());
        let dec31 = Date::new(12, 31).unwrap();
        assert!(HourlyPlot::new(vec![1.0; 24], dec31, "T", "C").is_ok());
        assert!(matches!(
            HourlyPlot::new(vec![1.0; 48], dec31, "T", "C"),
            Err(DisplayError::Translation(_))
        ));
        assert!(HourlyPlot::new(vec![1.0; 24], jan1, "T", "C")
            .unwrap()
            .with_dimensions(0.0, 4.0)
            .is_err());
    }

    #[test]
    fn test_year_grid() {
        let plot = year_plot();
        assert_eq!(plot.day_count(), 365);
        let mesh = plot.colored_mesh().unwrap();
        assert_eq!(mesh.face_count(), 8760);
        assert_eq!(mesh.vertex_count(), 366 * 25);

        // The second value is the 1 AM cell of the first day
        let face = &mesh.faces[1];
        assert_eq!(mesh.vertices[face[0]], Point3D::new(0.0, 4.0, 0.0));
        assert_eq!(mesh.vertices[face[2]], Point3D::new(1.0, 8.0, 0.0));

        let border = plot.chart_border();
        assert_eq!(border.len(), 5);
        assert_eq!(border.vertices[2], Point3D::new(365.0, 96.0, 0.0));
    }

    #[test]
    fn test_month_axis() {
        let plot = year_plot();
        assert_eq!(plot.month_lines().len(), 11);
        assert_eq!(plot.month_lines()[0].p1.x, 31.0);
        let labels = plot.month_labels();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].0, "Jan");
        assert_eq!(labels[0].1.x, 15.5);
        assert!(labels.iter().all(|(_, pt)| pt.y < 0.0));

        // Two weeks straddling the end of February
        let values = vec![0.0; 14 * 24];
        let partial = HourlyPlot::new(values, Date::new(2, 22).unwrap(), "T", "C").unwrap();
        let names: Vec<&str> = partial.month_labels().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Feb", "Mar"]);
        assert_eq!(partial.month_lines().len(), 1);
        assert_eq!(partial.month_lines()[0].p1.x, 7.0);
    }

    #[test]
    fn test_hour_axis() {
        let plot = year_plot().with_base_point(Point3D::new(10.0, 0.0, 2.0));
        let lines = plot.hour_lines(&DEFAULT_CUSTOM_HOURS).unwrap();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[4].p1, Point3D::new(10.0, 48.0, 2.0));
        assert_eq!(lines[4].p2, Point3D::new(375.0, 48.0, 2.0));
        let points = plot.hour_label_points(&DEFAULT_CUSTOM_HOURS).unwrap();
        assert!(points.iter().all(|p| p.x < 10.0));
        assert!(plot.hour_lines(&[25]).is_err());

        let labels: Vec<String> = [0, 3, 12, 15, 24].into_iter().map(hour_label).collect();
        assert_eq!(labels, vec!["12 AM", "3 AM", "12 PM", "3 PM", "12 AM"]);
        assert_eq!(plot.title_text(), "Dry Bulb Temperature (C)");
    }
}
