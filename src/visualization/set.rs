//! Visualization sets and the group assembler

use super::analysis::AnalysisGeometry;
use super::context::ContextGeometry;
use super::validate_identifier;
use crate::display::error::{DisplayError, Result};
use crate::display::DisplayGeometry;
use crate::geometry::{bounding_box, Geometry, Point3D};
use serde::{Deserialize, Serialize};

/// One named group of a visualization set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualizationGroup {
    #[serde(rename = "ContextGeometry")]
    Context(ContextGeometry),
    #[serde(rename = "AnalysisGeometry")]
    Analysis(AnalysisGeometry),
}

impl VisualizationGroup {
    pub fn identifier(&self) -> &str {
        match self {
            VisualizationGroup::Context(g) => &g.identifier,
            VisualizationGroup::Analysis(g) => &g.identifier,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            VisualizationGroup::Context(g) => &g.display_name,
            VisualizationGroup::Analysis(g) => &g.display_name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VisualizationGroup::Context(g) => g.len(),
            VisualizationGroup::Analysis(g) => g.geometry.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_context(&self) -> Option<&ContextGeometry> {
        match self {
            VisualizationGroup::Context(g) => Some(g),
            VisualizationGroup::Analysis(_) => None,
        }
    }

    pub fn as_analysis(&self) -> Option<&AnalysisGeometry> {
        match self {
            VisualizationGroup::Analysis(g) => Some(g),
            VisualizationGroup::Context(_) => None,
        }
    }

    /// Undecorated geometry of the group, in display order
    pub fn raw_geometry(&self) -> Box<dyn Iterator<Item = &Geometry> + '_> {
        match self {
            VisualizationGroup::Context(g) => Box::new(g.raw_geometry()),
            VisualizationGroup::Analysis(g) => Box::new(g.geometry.iter()),
        }
    }
}

impl From<ContextGeometry> for VisualizationGroup {
    fn from(value: ContextGeometry) -> Self {
        VisualizationGroup::Context(value)
    }
}

impl From<AnalysisGeometry> for VisualizationGroup {
    fn from(value: AnalysisGeometry) -> Self {
        VisualizationGroup::Analysis(value)
    }
}

/// An ordered collection of uniquely named groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSet {
    pub identifier: String,
    pub display_name: String,
    groups: Vec<VisualizationGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Value>,
}

impl VisualizationSet {
    /// Create an empty set
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        Ok(VisualizationSet {
            display_name: identifier.clone(),
            identifier,
            groups: Vec::new(),
            user_data: None,
        })
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_user_data(mut self, user_data: serde_json::Value) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Append a group at the end of the set
    ///
    /// Fails with DuplicateGroup when a group with the same identifier exists.
    pub fn add_group(&mut self, group: impl Into<VisualizationGroup>) -> Result<()> {
        let group = group.into();
        if self.group(group.identifier()).is_some() {
            return Err(DisplayError::DuplicateGroup(format!(
                "'{}' already exists in visualization set '{}'",
                group.identifier(),
                self.identifier
            )));
        }
        tracing::debug!(
            "Adding group '{}' ({} geometries) to '{}'",
            group.identifier(),
            group.len(),
            self.identifier
        );
        self.groups.push(group);
        Ok(())
    }

    /// Append every group of another set, keeping their order
    pub fn extend(&mut self, other: VisualizationSet) -> Result<()> {
        for group in other.groups {
            self.add_group(group)?;
        }
        Ok(())
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.identifier()).collect()
    }

    pub fn group(&self, identifier: &str) -> Option<&VisualizationGroup> {
        self.groups.iter().find(|g| g.identifier() == identifier)
    }

    pub fn groups(&self) -> &[VisualizationGroup] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VisualizationGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn bounds(&self) -> Option<(Point3D, Point3D)> {
        bounding_box(self.groups.iter().flat_map(|g| g.raw_geometry()))
    }

    /// Lower corner of the box around all geometry in the set
    pub fn min_point(&self) -> Option<Point3D> {
        self.bounds().map(|(min, _)| min)
    }

    /// Upper corner of the box around all geometry in the set
    pub fn max_point(&self) -> Option<Point3D> {
        self.bounds().map(|(_, max)| max)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a set, re-checking identifiers and group uniqueness
    ///
    /// Analysis groups, meshes and text are checked while they are parsed.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: VisualizationSet = serde_json::from_str(json)?;
        let mut set = VisualizationSet::new(parsed.identifier)?;
        set.display_name = parsed.display_name;
        set.user_data = parsed.user_data;
        for group in parsed.groups {
            validate_identifier(group.identifier())?;
            set.add_group(group)?;
        }
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a VisualizationSet {
    type Item = &'a VisualizationGroup;
    type IntoIter = std::slice::Iter<'a, VisualizationGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Build a visualization set from named collections of decorated geometry
///
/// Each collection becomes a context group. Group order and the order of
/// geometry inside each group are preserved; repeated names fail with
/// DuplicateGroup.
pub fn assemble<I, S>(identifier: &str, groups: I) -> Result<VisualizationSet>
where
    I: IntoIterator<Item = (S, Vec<DisplayGeometry>)>,
    S: Into<String>,
{
    let mut set = VisualizationSet::new(identifier)?;
    for (name, geometry) in groups {
        set.add_group(ContextGeometry::new(name, geometry)?)?;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Color;
    use crate::visualization::{LegendParameters, VisualizationData};

    fn points(n: usize) -> Vec<DisplayGeometry> {
        (0..n)
            .map(|i| DisplayGeometry::colored(Point3D::new(i as f64, 1.0, 2.0), Color::ORANGE))
            .collect()
    }

    #[test]
    fn test_assemble_preserves_group_order() {
        let set = assemble("Diagram", vec![("Sun Paths", points(3)), ("Compass", points(1))])
            .unwrap();
        assert_eq!(set.group_names(), vec!["Sun Paths", "Compass"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.group("Sun Paths").unwrap().len(), 3);
        assert_eq!(
            set.group("Sun Paths").unwrap().as_context().unwrap().geometry,
            points(3)
        );
    }

    #[test]
    fn test_assemble_rejects_duplicate_groups() {
        let result = assemble("Diagram", vec![("Compass", points(1)), ("Compass", points(2))]);
        assert!(matches!(result, Err(DisplayError::DuplicateGroup(_))));
    }

    #[test]
    fn test_extend_checks_duplicates() {
        let mut first = assemble("First", vec![("A", points(1))]).unwrap();
        let second = assemble("Second", vec![("B", points(1))]).unwrap();
        first.extend(second.clone()).unwrap();
        assert_eq!(first.group_names(), vec!["A", "B"]);
        assert!(matches!(
            first.extend(second),
            Err(DisplayError::DuplicateGroup(_))
        ));
    }

    #[test]
    fn test_bounds() {
        let set = assemble("Diagram", vec![("Points", points(4))]).unwrap();
        assert_eq!(set.min_point(), Some(Point3D::new(0.0, 1.0, 2.0)));
        assert_eq!(set.max_point(), Some(Point3D::new(3.0, 1.0, 2.0)));

        let empty = VisualizationSet::new("Empty").unwrap();
        assert!(empty.min_point().is_none());
    }

    #[test]
    fn test_json_round_trip_with_analysis_group() {
        let mut set = assemble("Diagram", vec![("Compass", points(2))]).unwrap();
        let data = VisualizationData::new(vec![1.0, 2.0], LegendParameters::default()).unwrap();
        let analysis = AnalysisGeometry::new(
            "Sun_Positions",
            points(2).into_iter().map(|g| g.geometry).collect(),
            vec![data],
        )
        .unwrap();
        set.add_group(analysis).unwrap();

        let json = set.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["groups"][0]["type"], "ContextGeometry");
        assert_eq!(value["groups"][1]["type"], "AnalysisGeometry");

        let back = VisualizationSet::from_json(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let set = assemble("Diagram", vec![("A", points(1))]).unwrap();
        let mut value = serde_json::to_value(&set).unwrap();
        let group = value["groups"][0].clone();
        value["groups"].as_array_mut().unwrap().push(group);
        assert!(matches!(
            VisualizationSet::from_json(&value.to_string()),
            Err(DisplayError::DuplicateGroup(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_tampered_analysis_data() {
        let mut set = assemble("Diagram", vec![("Compass", points(1))]).unwrap();
        let data = VisualizationData::new(vec![1.0, 2.0], LegendParameters::default()).unwrap();
        let analysis = AnalysisGeometry::new(
            "Sun_Positions",
            points(2).into_iter().map(|g| g.geometry).collect(),
            vec![data],
        )
        .unwrap();
        set.add_group(analysis).unwrap();
        let value = serde_json::to_value(&set).unwrap();

        let mut tampered = value.clone();
        tampered["groups"][1]["data_sets"][0]["values"] =
            serde_json::json!([1.0, 2.0, 3.0, 4.0, 5.0]);
        tampered["groups"][1]["active_data"] = serde_json::json!(7);
        assert!(VisualizationSet::from_json(&tampered.to_string()).is_err());

        let mut bad_active = value;
        bad_active["groups"][1]["active_data"] = serde_json::json!(7);
        let err = VisualizationSet::from_json(&bad_active.to_string()).unwrap_err();
        assert!(err.to_string().contains("active data index 7"));
    }
}
