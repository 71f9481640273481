//! Default attributes per semantic role and caller overrides
//!
//! Every element a translator draws has a role. The attributes of an element
//! are resolved in this order, later steps winning:
//! 1. the role default
//! 2. the structural variation of the element (dashed second half-year
//!    analemmas, wider solstice arcs, ...)
//! 3. the global override
//! 4. the override for the element's role

use crate::display::attributes::{
    AttributeOverride, DisplayAttributes, DisplayMode, LineType, LineWidth,
};
use crate::display::error::{DisplayError, Result};
use crate::display::properties::PropertyReader;
use crate::display::{Color, DisplayGeometry};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Radius of sun points in pixels
pub const SUN_POINT_RADIUS: f64 = 5.0;

/// Semantic role of an element drawn by a translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementRole {
    CompassBoundary,
    CompassTick,
    CompassText,
    AltitudeCircle,
    AltitudeText,
    Analemma,
    DailyArc,
    SunPosition,
    OrientationLine,
    FrequencyLine,
    RoseMesh,
    ChartBorder,
    ChartAxis,
    ChartText,
    ProfileLine,
}

impl ElementRole {
    pub const ALL: [ElementRole; 15] = [
        ElementRole::CompassBoundary,
        ElementRole::CompassTick,
        ElementRole::CompassText,
        ElementRole::AltitudeCircle,
        ElementRole::AltitudeText,
        ElementRole::Analemma,
        ElementRole::DailyArc,
        ElementRole::SunPosition,
        ElementRole::OrientationLine,
        ElementRole::FrequencyLine,
        ElementRole::RoseMesh,
        ElementRole::ChartBorder,
        ElementRole::ChartAxis,
        ElementRole::ChartText,
        ElementRole::ProfileLine,
    ];

    /// Name used as the prefix of role-scoped properties (`<name>.color`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementRole::CompassBoundary => "compass_boundary",
            ElementRole::CompassTick => "compass_tick",
            ElementRole::CompassText => "compass_text",
            ElementRole::AltitudeCircle => "altitude_circle",
            ElementRole::AltitudeText => "altitude_text",
            ElementRole::Analemma => "analemma",
            ElementRole::DailyArc => "daily_arc",
            ElementRole::SunPosition => "sun_position",
            ElementRole::OrientationLine => "orientation_line",
            ElementRole::FrequencyLine => "frequency_line",
            ElementRole::RoseMesh => "rose_mesh",
            ElementRole::ChartBorder => "chart_border",
            ElementRole::ChartAxis => "chart_axis",
            ElementRole::ChartText => "chart_text",
            ElementRole::ProfileLine => "profile_line",
        }
    }

    /// Attributes an element of this role gets when nothing overrides them
    pub fn default_attributes(&self) -> DisplayAttributes {
        let base = DisplayAttributes::default();
        match self {
            ElementRole::AltitudeCircle
            | ElementRole::OrientationLine
            | ElementRole::FrequencyLine => base.with_line_type(LineType::Dotted),
            ElementRole::SunPosition => AttributeOverride {
                color: Some(Color::ORANGE),
                radius: Some(SUN_POINT_RADIUS),
                ..Default::default()
            }
            .apply(&base),
            ElementRole::RoseMesh => base.with_display_mode(DisplayMode::SurfaceWithEdges),
            ElementRole::ChartBorder => AttributeOverride {
                line_width: Some(LineWidth::Pixels(2.0)),
                ..Default::default()
            }
            .apply(&base),
            ElementRole::CompassBoundary
            | ElementRole::CompassTick
            | ElementRole::CompassText
            | ElementRole::AltitudeText
            | ElementRole::Analemma
            | ElementRole::DailyArc
            | ElementRole::ChartAxis
            | ElementRole::ChartText
            | ElementRole::ProfileLine => base,
        }
    }
}

impl FromStr for ElementRole {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim().to_lowercase();
        ElementRole::ALL
            .into_iter()
            .find(|r| r.as_str() == clean)
            .ok_or_else(|| DisplayError::Config(format!("Unknown element role '{}'", s)))
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller overrides: one for every element and one per role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default)]
    pub global: Option<AttributeOverride>,
    #[serde(default)]
    pub roles: BTreeMap<ElementRole, AttributeOverride>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, global: AttributeOverride) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_role(mut self, role: ElementRole, role_override: AttributeOverride) -> Self {
        self.roles.insert(role, role_override);
        self
    }

    /// Read `color`, `line_width`, `line_type`, `display_mode`,
    /// `point_radius` and their role-scoped variants (`sun_position.color`, ...)
    ///
    /// Invalid values fail with InvalidAttribute.
    pub fn from_properties(reader: &PropertyReader) -> Result<Self> {
        let mut styles = StyleOverrides::new();

        let global = AttributeOverride::from_options(&reader.get_attribute_options(None))?;
        if !global.is_empty() {
            styles.global = Some(global);
        }

        for role in ElementRole::ALL {
            let options = reader.get_attribute_options(Some(role.as_str()));
            let role_override = AttributeOverride::from_options(&options)?;
            if !role_override.is_empty() {
                tracing::debug!("Style override for {}: {:?}", role, role_override);
                styles.roles.insert(role, role_override);
            }
        }
        Ok(styles)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.roles.is_empty()
    }

    /// Final attributes of an element with a role and a structural variation
    pub fn resolve(&self, role: ElementRole, variation: &AttributeOverride) -> DisplayAttributes {
        let mut attributes = variation.apply(&role.default_attributes());
        if let Some(global) = &self.global {
            attributes = global.apply(&attributes);
        }
        if let Some(role_override) = self.roles.get(&role) {
            attributes = role_override.apply(&attributes);
        }
        attributes
    }

    /// Decorate geometry for a role without structural variation
    pub fn decorate(&self, role: ElementRole, geometry: impl Into<Geometry>) -> DisplayGeometry {
        self.decorate_with(role, &AttributeOverride::default(), geometry)
    }

    pub fn decorate_with(
        &self,
        role: ElementRole,
        variation: &AttributeOverride,
        geometry: impl Into<Geometry>,
    ) -> DisplayGeometry {
        DisplayGeometry::new(geometry, self.resolve(role, variation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashed_wide() -> AttributeOverride {
        AttributeOverride {
            line_width: Some(LineWidth::Pixels(2.0)),
            line_type: Some(LineType::Dashed),
            ..Default::default()
        }
    }

    #[test]
    fn test_role_defaults() {
        assert_eq!(
            ElementRole::SunPosition.default_attributes().color(),
            Color::ORANGE
        );
        assert_eq!(
            ElementRole::SunPosition.default_attributes().radius(),
            Some(SUN_POINT_RADIUS)
        );
        assert_eq!(ElementRole::Analemma.default_attributes().radius(), None);
        assert_eq!(
            ElementRole::FrequencyLine.default_attributes().line_type(),
            LineType::Dotted
        );
        assert_eq!(
            ElementRole::RoseMesh.default_attributes().display_mode(),
            DisplayMode::SurfaceWithEdges
        );
        assert_eq!(
            ElementRole::DailyArc.default_attributes(),
            DisplayAttributes::default()
        );
        assert_eq!(
            ElementRole::ChartBorder.default_attributes().line_width(),
            LineWidth::Pixels(2.0)
        );
    }

    #[test]
    fn test_resolution_order() {
        let styles = StyleOverrides::new()
            .with_global(AttributeOverride::color(Color::rgb(0, 0, 255)))
            .with_role(
                ElementRole::Analemma,
                AttributeOverride {
                    line_type: Some(LineType::DashDot),
                    ..Default::default()
                },
            );

        // Variation beats the role default, global beats the variation
        let arc = styles.resolve(ElementRole::DailyArc, &dashed_wide());
        assert_eq!(arc.color(), Color::rgb(0, 0, 255));
        assert_eq!(arc.line_type(), LineType::Dashed);
        assert_eq!(arc.line_width(), LineWidth::Pixels(2.0));

        // Role override beats everything
        let analemma = styles.resolve(ElementRole::Analemma, &dashed_wide());
        assert_eq!(analemma.line_type(), LineType::DashDot);
        assert_eq!(analemma.color(), Color::rgb(0, 0, 255));
    }

    #[test]
    fn test_from_properties() {
        let reader = PropertyReader::from_pairs([
            ("line_width", "3"),
            ("sun_position.color", "#FF0000"),
            ("daily_arc.line_type", "dotted"),
            ("sun_position.point_radius", "8"),
        ]);
        let styles = StyleOverrides::from_properties(&reader).unwrap();
        assert_eq!(
            styles.global.unwrap().line_width,
            Some(LineWidth::Pixels(3.0))
        );
        assert_eq!(
            styles.roles[&ElementRole::SunPosition].color,
            Some(Color::rgb(255, 0, 0))
        );
        assert_eq!(styles.roles[&ElementRole::SunPosition].radius, Some(8.0));
        assert_eq!(
            styles.roles[&ElementRole::DailyArc].line_type,
            Some(LineType::Dotted)
        );
        assert_eq!(styles.roles.len(), 2);
        assert!(StyleOverrides::from_properties(&PropertyReader::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_properties_fail() {
        let reader = PropertyReader::from_pairs([("analemma.line_width", "-1")]);
        assert!(matches!(
            StyleOverrides::from_properties(&reader),
            Err(DisplayError::InvalidAttribute(_))
        ));
        let reader = PropertyReader::from_pairs([("line_type", "wavy")]);
        assert!(StyleOverrides::from_properties(&reader).is_err());
    }

    #[test]
    fn test_role_names_parse() {
        for role in ElementRole::ALL {
            assert_eq!(role.as_str().parse::<ElementRole>().unwrap(), role);
        }
        assert!("halo".parse::<ElementRole>().is_err());
    }
}
