//! Wind rose built from paired direction and value series

use super::compass::Compass;
use crate::display::error::{DisplayError, Result};
use crate::geometry::{Mesh3D, Point2D, Point3D};
use crate::visualization::LegendParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_DIRECTION_COUNT: usize = 36;
pub const DEFAULT_FREQUENCY_HOURS: f64 = 50.0;
pub const DEFAULT_FREQUENCY_SPACING: f64 = 5.0;

/// Largest number of direction bins (one per degree)
pub const MAX_DIRECTION_COUNT: usize = 360;

/// Largest number of frequency rings a rose may draw
pub const MAX_FREQUENCY_INTERVALS: usize = 1000;

/// A wind rose: values binned by the direction they came from
///
/// Bins are centered on `i * 360 / direction_count` degrees clockwise from
/// north. Each ring of the rose stands for `frequency_hours` hours and is
/// drawn `frequency_spacing_distance` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindRose {
    directions: Vec<f64>,
    values: Vec<f64>,
    direction_count: usize,
    frequency_hours: f64,
    frequency_spacing_distance: f64,
    pub north_angle: f64,
    pub base_point: Point2D,
    pub data_type: String,
    pub unit: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub legend_parameters: LegendParameters,
}

impl WindRose {
    /// Create a wind rose from aligned direction and value series
    pub fn new(directions: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if directions.len() != values.len() {
            return Err(DisplayError::Translation(format!(
                "Wind rose has {} directions but {} values",
                directions.len(),
                values.len()
            )));
        }
        if directions.iter().chain(&values).any(|v| !v.is_finite()) {
            return Err(DisplayError::Translation(
                "Wind rose data contains non-finite numbers".to_string(),
            ));
        }
        Ok(WindRose {
            directions: directions.iter().map(|d| d.rem_euclid(360.0)).collect(),
            values,
            direction_count: DEFAULT_DIRECTION_COUNT,
            frequency_hours: DEFAULT_FREQUENCY_HOURS,
            frequency_spacing_distance: DEFAULT_FREQUENCY_SPACING,
            north_angle: 0.0,
            base_point: Point2D::default(),
            data_type: "Wind Speed".to_string(),
            unit: "m/s".to_string(),
            metadata: BTreeMap::new(),
            legend_parameters: LegendParameters::default(),
        })
    }

    pub fn with_direction_count(mut self, direction_count: usize) -> Result<Self> {
        if !(3..=MAX_DIRECTION_COUNT).contains(&direction_count) {
            return Err(DisplayError::Translation(format!(
                "Wind rose needs between 3 and {} directions, got {}",
                MAX_DIRECTION_COUNT, direction_count
            )));
        }
        self.direction_count = direction_count;
        Ok(self)
    }

    pub fn with_frequency_hours(mut self, frequency_hours: f64) -> Result<Self> {
        if !frequency_hours.is_finite() || frequency_hours <= 0.0 {
            return Err(DisplayError::Translation(format!(
                "Frequency hours must be positive, got {}",
                frequency_hours
            )));
        }
        self.frequency_hours = frequency_hours;
        Ok(self)
    }

    pub fn with_frequency_spacing_distance(mut self, distance: f64) -> Result<Self> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(DisplayError::Translation(format!(
                "Frequency spacing must be positive, got {}",
                distance
            )));
        }
        self.frequency_spacing_distance = distance;
        Ok(self)
    }

    pub fn with_north_angle(mut self, north_angle: f64) -> Self {
        self.north_angle = north_angle;
        self
    }

    pub fn with_base_point(mut self, base_point: Point2D) -> Self {
        self.base_point = base_point;
        self
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>, unit: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self.unit = unit.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_legend_parameters(mut self, legend_parameters: LegendParameters) -> Self {
        self.legend_parameters = legend_parameters;
        self
    }

    pub fn directions(&self) -> &[f64] {
        &self.directions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn direction_count(&self) -> usize {
        self.direction_count
    }

    pub fn frequency_hours(&self) -> f64 {
        self.frequency_hours
    }

    pub fn frequency_spacing_distance(&self) -> f64 {
        self.frequency_spacing_distance
    }

    /// Angular width of each direction bin in degrees
    pub fn bin_width(&self) -> f64 {
        360.0 / self.direction_count as f64
    }

    /// Bin index of a direction
    pub fn bin_index(&self, direction: f64) -> usize {
        let width = self.bin_width();
        let shifted = direction.rem_euclid(360.0) + width / 2.0;
        (shifted / width).floor() as usize % self.direction_count
    }

    /// Values falling into each direction bin, in input order
    pub fn histogram(&self) -> Vec<Vec<f64>> {
        let mut bins = vec![Vec::new(); self.direction_count];
        for (direction, value) in self.directions.iter().zip(&self.values) {
            bins[self.bin_index(*direction)].push(*value);
        }
        bins
    }

    /// Number of frequency rings needed to hold the fullest bin (at least one)
    ///
    /// Fails when `frequency_hours` is so small relative to the data that
    /// the rose would need more than `MAX_FREQUENCY_INTERVALS` rings.
    pub fn frequency_intervals(&self) -> Result<usize> {
        let max_count = self.histogram().iter().map(Vec::len).max().unwrap_or(0);
        let rings = (max_count as f64 / self.frequency_hours).ceil();
        if !rings.is_finite() || rings > MAX_FREQUENCY_INTERVALS as f64 {
            return Err(DisplayError::Translation(format!(
                "{} hours per ring would need {} rings for {} hours (limit {})",
                self.frequency_hours, rings, max_count, MAX_FREQUENCY_INTERVALS
            )));
        }
        Ok((rings as usize).max(1))
    }

    /// Radius of the outermost frequency ring
    pub fn radius(&self) -> Result<f64> {
        Ok(self.frequency_intervals()? as f64 * self.frequency_spacing_distance)
    }

    /// Compass sized to the outermost ring
    pub fn compass(&self) -> Result<Compass> {
        Compass::new(self.radius()?, self.base_point, self.north_angle)
    }

    /// Azimuths of the edges between bins
    fn edge_azimuths(&self) -> Vec<f64> {
        let width = self.bin_width();
        (0..self.direction_count)
            .map(|i| i as f64 * width - width / 2.0)
            .collect()
    }

    fn point_at(&self, azimuth: f64, distance: f64) -> Point2D {
        let angle = (self.north_angle - azimuth).to_radians();
        Point2D::new(self.base_point.x, self.base_point.y + distance)
            .rotate(angle, &self.base_point)
    }

    /// Spokes along the edges between direction bins
    pub fn orientation_lines(&self) -> Result<Vec<[Point2D; 2]>> {
        let radius = self.radius()?;
        Ok(self
            .edge_azimuths()
            .iter()
            .map(|az| [self.base_point, self.point_at(*az, radius)])
            .collect())
    }

    /// One closed polygon per frequency ring, from the innermost out
    pub fn frequency_lines(&self) -> Result<Vec<Vec<Point2D>>> {
        let edges = self.edge_azimuths();
        Ok((1..=self.frequency_intervals()?)
            .map(|ring| {
                let distance = ring as f64 * self.frequency_spacing_distance;
                edges.iter().map(|az| self.point_at(*az, distance)).collect()
            })
            .collect())
    }

    /// Legend interval of a value
    fn interval_index(&self, value: f64, min: f64, max: f64, count: usize) -> usize {
        if max <= min {
            return 0;
        }
        (((value - min) / (max - min) * count as f64).floor().max(0.0) as usize).min(count - 1)
    }

    fn mesh_with_colors(&self, z: f64) -> Result<(Mesh3D, Vec<f64>)> {
        if self.values.is_empty() {
            return Err(DisplayError::Translation(
                "Wind rose has no data to build a colored mesh".to_string(),
            ));
        }
        self.frequency_intervals()?;

        let data_min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.legend_parameters.min.unwrap_or(data_min);
        let max = self.legend_parameters.max.unwrap_or(data_max);
        let count = self.legend_parameters.segment_count.max(1);

        let width = self.bin_width();
        let scale = self.frequency_spacing_distance / self.frequency_hours;
        let mut vertices = Vec::new();
        let mut faces: Vec<Vec<usize>> = Vec::new();
        let mut colors = Vec::new();

        for (bin, values) in self.histogram().iter().enumerate() {
            let mut intervals: Vec<Vec<f64>> = vec![Vec::new(); count];
            for value in values {
                intervals[self.interval_index(*value, min, max, count)].push(*value);
            }

            let center = bin as f64 * width;
            let (left, right) = (center - width / 2.0, center + width / 2.0);
            let mut cumulative = 0usize;
            for interval in intervals.iter().filter(|i| !i.is_empty()) {
                let inner = cumulative as f64 * scale;
                cumulative += interval.len();
                let outer = cumulative as f64 * scale;

                let start = vertices.len();
                let flat = if inner > 0.0 {
                    vec![
                        self.point_at(right, inner),
                        self.point_at(right, outer),
                        self.point_at(left, outer),
                        self.point_at(left, inner),
                    ]
                } else {
                    vec![
                        self.base_point,
                        self.point_at(right, outer),
                        self.point_at(left, outer),
                    ]
                };
                faces.push((start..start + flat.len()).collect());
                vertices.extend(flat.iter().map(|p| Point3D::from_point2d(p, z)));
                colors.push(interval.iter().sum::<f64>() / interval.len() as f64);
            }
        }

        tracing::debug!(
            "Wind rose mesh: {} faces over {} directions",
            faces.len(),
            self.direction_count
        );
        Ok((Mesh3D::new(vertices, faces)?, colors))
    }

    /// Mesh of the rose petals, one face per non-empty legend interval of each bin
    pub fn colored_mesh(&self, z: f64) -> Result<Mesh3D> {
        self.mesh_with_colors(z).map(|(mesh, _)| mesh)
    }

    /// Mean value of each face of `colored_mesh`
    pub fn color_array(&self) -> Result<Vec<f64>> {
        self.mesh_with_colors(0.0).map(|(_, colors)| colors)
    }
}
