//! Analysis geometry: plain geometry colored by data sets

use super::validate_identifier;
use crate::display::colorsets::{colorsets, Colorset, DEFAULT_COLORSET};
use crate::display::error::{DisplayError, Result};
use crate::display::{Color, DisplayMode};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// Default number of legend segments
pub const DEFAULT_SEGMENT_COUNT: usize = 11;

/// How a legend maps values onto colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendParameters {
    /// Lower bound of the legend; None uses the data minimum
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound of the legend; None uses the data maximum
    #[serde(default)]
    pub max: Option<f64>,
    pub colorset: String,
    pub segment_count: usize,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for LegendParameters {
    fn default() -> Self {
        LegendParameters {
            min: None,
            max: None,
            colorset: DEFAULT_COLORSET.to_string(),
            segment_count: DEFAULT_SEGMENT_COUNT,
            title: None,
        }
    }
}

impl LegendParameters {
    /// Legend over a fixed range
    pub fn with_range(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DisplayError::InvalidAttribute(format!(
                "Invalid legend range [{}, {}]",
                min, max
            )));
        }
        Ok(LegendParameters {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        })
    }

    /// Switch to another registered colorset
    pub fn with_colorset(mut self, name: &str) -> Result<Self> {
        let colorset = colorsets()
            .get(name)
            .ok_or_else(|| DisplayError::InvalidAttribute(format!("Unknown colorset '{}'", name)))?;
        self.colorset = colorset.name.clone();
        Ok(self)
    }

    pub fn with_segment_count(mut self, segment_count: usize) -> Result<Self> {
        if segment_count < 2 {
            return Err(DisplayError::InvalidAttribute(format!(
                "Legend segment count must be at least 2, got {}",
                segment_count
            )));
        }
        self.segment_count = segment_count;
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The colorset this legend refers to
    pub fn colors(&self) -> Result<&'static Colorset> {
        colorsets().get(&self.colorset).ok_or_else(|| {
            DisplayError::InvalidAttribute(format!("Unknown colorset '{}'", self.colorset))
        })
    }
}

/// One data set attached to analysis geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VisualizationDataRepr")]
pub struct VisualizationData {
    pub values: Vec<f64>,
    pub legend_parameters: LegendParameters,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Deserialize)]
struct VisualizationDataRepr {
    values: Vec<f64>,
    legend_parameters: LegendParameters,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    unit: Option<String>,
}

impl TryFrom<VisualizationDataRepr> for VisualizationData {
    type Error = DisplayError;

    fn try_from(value: VisualizationDataRepr) -> Result<Self> {
        let mut data = VisualizationData::new(value.values, value.legend_parameters)?;
        data.data_type = value.data_type;
        data.unit = value.unit;
        Ok(data)
    }
}

impl VisualizationData {
    pub fn new(values: Vec<f64>, legend_parameters: LegendParameters) -> Result<Self> {
        if values.is_empty() {
            return Err(DisplayError::DataMismatch(
                "visualization data needs at least one value".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(DisplayError::DataMismatch(format!(
                "visualization data contains a non-finite value ({})",
                bad
            )));
        }
        legend_parameters.colors()?;
        Ok(VisualizationData {
            values,
            legend_parameters,
            data_type: None,
            unit: None,
        })
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>, unit: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self.unit = Some(unit.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Legend bounds, falling back to the data range
    pub fn range(&self) -> (f64, f64) {
        let data_min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (
            self.legend_parameters.min.unwrap_or(data_min),
            self.legend_parameters.max.unwrap_or(data_max),
        )
    }

    /// Color of each value on the legend's colorset
    pub fn value_colors(&self) -> Result<Vec<Color>> {
        let colorset = self.legend_parameters.colors()?;
        let (min, max) = self.range();
        let span = max - min;
        Ok(self
            .values
            .iter()
            .map(|v| {
                let t = if span > 0.0 { (v - min) / span } else { 0.0 };
                colorset.interpolate(t)
            })
            .collect())
    }
}

/// Which element of the geometry each data value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchingMethod {
    Geometries,
    Faces,
    Vertices,
}

/// A named group of geometry colored by data
///
/// Parsed groups are rebuilt through `AnalysisGeometry::new`, so data sets
/// and the active index are checked the same way as for built groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnalysisGeometryRepr")]
pub struct AnalysisGeometry {
    pub identifier: String,
    pub display_name: String,
    pub geometry: Vec<Geometry>,
    pub data_sets: Vec<VisualizationData>,
    #[serde(default)]
    pub active_data: usize,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Deserialize)]
struct AnalysisGeometryRepr {
    identifier: String,
    display_name: String,
    geometry: Vec<Geometry>,
    data_sets: Vec<VisualizationData>,
    #[serde(default)]
    active_data: usize,
    #[serde(default)]
    display_mode: DisplayMode,
    #[serde(default)]
    hidden: bool,
}

impl TryFrom<AnalysisGeometryRepr> for AnalysisGeometry {
    type Error = DisplayError;

    fn try_from(value: AnalysisGeometryRepr) -> Result<Self> {
        Ok(
            AnalysisGeometry::new(value.identifier, value.geometry, value.data_sets)?
                .with_active_data(value.active_data)?
                .with_display_name(value.display_name)
                .with_display_mode(value.display_mode)
                .with_hidden(value.hidden),
        )
    }
}

impl AnalysisGeometry {
    /// Create an analysis group, checking every data set against the geometry
    pub fn new(
        identifier: impl Into<String>,
        geometry: Vec<Geometry>,
        data_sets: Vec<VisualizationData>,
    ) -> Result<Self> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        if geometry.is_empty() {
            return Err(DisplayError::DataMismatch(format!(
                "analysis group '{}' has no geometry",
                identifier
            )));
        }
        if data_sets.is_empty() {
            return Err(DisplayError::DataMismatch(format!(
                "analysis group '{}' has no data sets",
                identifier
            )));
        }

        let mut group = AnalysisGeometry {
            display_name: identifier.clone(),
            identifier,
            geometry,
            data_sets: Vec::with_capacity(data_sets.len()),
            active_data: 0,
            display_mode: DisplayMode::Surface,
            hidden: false,
        };
        for data in data_sets {
            group.add_data_set(data)?;
        }
        Ok(group)
    }

    /// Attach another data set
    pub fn add_data_set(&mut self, data: VisualizationData) -> Result<()> {
        self.matching_method(&data)?;
        self.data_sets.push(data);
        Ok(())
    }

    /// Determine how a data set lines up with this group's geometry
    ///
    /// Values match geometry objects one to one, or (for all-mesh groups)
    /// the total face count or vertex count.
    pub fn matching_method(&self, data: &VisualizationData) -> Result<MatchingMethod> {
        let count = data.len();
        if count == self.geometry.len() {
            return Ok(MatchingMethod::Geometries);
        }

        let meshes: Option<Vec<_>> = self.geometry.iter().map(Geometry::as_mesh).collect();
        if let Some(meshes) = meshes {
            if count == meshes.iter().map(|m| m.face_count()).sum::<usize>() {
                return Ok(MatchingMethod::Faces);
            }
            if count == meshes.iter().map(|m| m.vertex_count()).sum::<usize>() {
                return Ok(MatchingMethod::Vertices);
            }
        }

        Err(DisplayError::DataMismatch(format!(
            "{} values do not match the {} geometries of '{}'",
            count,
            self.geometry.len(),
            self.identifier
        )))
    }

    pub fn with_active_data(mut self, active_data: usize) -> Result<Self> {
        if active_data >= self.data_sets.len() {
            return Err(DisplayError::DataMismatch(format!(
                "active data index {} is out of range for {} data sets",
                active_data,
                self.data_sets.len()
            )));
        }
        self.active_data = active_data;
        Ok(self)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The data set currently shown
    pub fn active(&self) -> Option<&VisualizationData> {
        self.data_sets.get(self.active_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Mesh3D, Point3D};

    fn quad_mesh() -> Mesh3D {
        Mesh3D::new(
            vec![
                Point3D::new(0.0, 0.0, 0.0),
                Point3D::new(1.0, 0.0, 0.0),
                Point3D::new(1.0, 1.0, 0.0),
                Point3D::new(0.0, 1.0, 0.0),
                Point3D::new(2.0, 0.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 4, 2]],
        )
        .unwrap()
    }

    fn data(values: Vec<f64>) -> VisualizationData {
        VisualizationData::new(values, LegendParameters::default()).unwrap()
    }

    #[test]
    fn test_value_colors_follow_legend() {
        let legend = LegendParameters::with_range(0.0, 10.0)
            .unwrap()
            .with_colorset("black_to_white")
            .unwrap();
        let data = VisualizationData::new(vec![0.0, 5.0, 10.0, 20.0], legend).unwrap();
        let colors = data.value_colors().unwrap();
        assert_eq!(colors[0], Color::BLACK);
        assert_eq!(colors[1], Color::rgb(128, 128, 128));
        assert_eq!(colors[2], Color::WHITE);
        assert_eq!(colors[3], Color::WHITE);
    }

    #[test]
    fn test_value_colors_use_data_range() {
        let data = data(vec![3.0, 3.0]);
        assert_eq!(data.range(), (3.0, 3.0));
        let colors = data.value_colors().unwrap();
        assert_eq!(colors[0], colors[1]);
    }

    #[test]
    fn test_legend_validation() {
        assert!(LegendParameters::with_range(5.0, 1.0).is_err());
        assert!(matches!(
            LegendParameters::default().with_colorset("no_such_colors"),
            Err(DisplayError::InvalidAttribute(_))
        ));
        assert!(LegendParameters::default().with_segment_count(1).is_err());
        assert!(VisualizationData::new(Vec::new(), LegendParameters::default()).is_err());
        assert!(VisualizationData::new(vec![f64::NAN], LegendParameters::default()).is_err());
    }

    #[test]
    fn test_matching_methods() {
        let mesh = Geometry::from(quad_mesh());
        let group = AnalysisGeometry::new("Mesh", vec![mesh], vec![data(vec![1.0])]).unwrap();
        assert_eq!(
            group.matching_method(&data(vec![1.0])).unwrap(),
            MatchingMethod::Geometries
        );
        assert_eq!(
            group.matching_method(&data(vec![1.0, 2.0])).unwrap(),
            MatchingMethod::Faces
        );
        assert_eq!(
            group.matching_method(&data(vec![1.0; 5])).unwrap(),
            MatchingMethod::Vertices
        );
        assert!(matches!(
            group.matching_method(&data(vec![1.0; 3])),
            Err(DisplayError::DataMismatch(_))
        ));
    }

    #[test]
    fn test_points_must_match_one_to_one() {
        let points = vec![
            Geometry::from(Point3D::new(0.0, 0.0, 0.0)),
            Geometry::from(Point3D::new(1.0, 0.0, 0.0)),
        ];
        assert!(AnalysisGeometry::new("Suns", points.clone(), vec![data(vec![1.0, 2.0])]).is_ok());
        assert!(matches!(
            AnalysisGeometry::new("Suns", points.clone(), vec![data(vec![1.0, 2.0, 3.0])]),
            Err(DisplayError::DataMismatch(_))
        ));
        assert!(AnalysisGeometry::new("Suns", points, Vec::new()).is_err());
    }

    #[test]
    fn test_active_data() {
        let points = vec![Geometry::from(Point3D::default())];
        let group = AnalysisGeometry::new("Suns", points, vec![data(vec![1.0]), data(vec![2.0])])
            .unwrap()
            .with_active_data(1)
            .unwrap();
        assert_eq!(group.active().unwrap().values, vec![2.0]);
        assert!(group.with_active_data(2).is_err());
    }

    #[test]
    fn test_parsed_group_is_checked() {
        let points = vec![
            Geometry::from(Point3D::new(0.0, 0.0, 0.0)),
            Geometry::from(Point3D::new(1.0, 0.0, 0.0)),
        ];
        let group = AnalysisGeometry::new("Suns", points, vec![data(vec![1.0, 2.0])])
            .unwrap()
            .with_display_name("Sun Positions");
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(
            serde_json::from_value::<AnalysisGeometry>(value.clone()).unwrap(),
            group
        );

        let mut extra_values = value.clone();
        extra_values["data_sets"][0]["values"] = serde_json::json!([1.0, 2.0, 3.0]);
        assert!(serde_json::from_value::<AnalysisGeometry>(extra_values).is_err());

        let mut bad_active = value.clone();
        bad_active["active_data"] = serde_json::json!(3);
        assert!(serde_json::from_value::<AnalysisGeometry>(bad_active).is_err());

        let mut no_values = value;
        no_values["data_sets"][0]["values"] = serde_json::json!([]);
        assert!(serde_json::from_value::<AnalysisGeometry>(no_values).is_err());
    }
}
