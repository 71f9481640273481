//! Display attributes attached to geometry
//!
//! `DisplayAttributes` is an immutable value: color, line width, line type,
//! display mode and, for points, an optional radius. Construction validates
//! every field and fails with `DisplayError::InvalidAttribute` for
//! out-of-domain values.

use super::color::Color;
use super::error::{DisplayError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of line used to draw curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineType {
    #[default]
    Continuous,
    Dashed,
    Dotted,
    DashDot,
}

impl LineType {
    pub const ALL: [LineType; 4] = [
        LineType::Continuous,
        LineType::Dashed,
        LineType::Dotted,
        LineType::DashDot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Continuous => "Continuous",
            LineType::Dashed => "Dashed",
            LineType::Dotted => "Dotted",
            LineType::DashDot => "DashDot",
        }
    }
}

impl FromStr for LineType {
    type Err = DisplayError;

    /// Case-insensitive; "solid" is accepted for Continuous
    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim().to_lowercase();
        if clean == "solid" {
            return Ok(LineType::Continuous);
        }
        LineType::ALL
            .into_iter()
            .find(|lt| lt.as_str().to_lowercase() == clean)
            .ok_or_else(|| {
                DisplayError::InvalidAttribute(format!(
                    "line_type '{}' is not recognized. Choose from: {}",
                    s,
                    "Continuous, Dashed, Dotted, DashDot"
                ))
            })
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How surfaces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Surface,
    SurfaceWithEdges,
    Wireframe,
    Points,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Surface,
        DisplayMode::SurfaceWithEdges,
        DisplayMode::Wireframe,
        DisplayMode::Points,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Surface => "Surface",
            DisplayMode::SurfaceWithEdges => "SurfaceWithEdges",
            DisplayMode::Wireframe => "Wireframe",
            DisplayMode::Points => "Points",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim().to_lowercase();
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().to_lowercase() == clean)
            .ok_or_else(|| {
                DisplayError::InvalidAttribute(format!(
                    "display_mode '{}' is not recognized. Choose from: {}",
                    s,
                    "Surface, SurfaceWithEdges, Wireframe, Points"
                ))
            })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line width in screen pixels, or the viewer's own default
///
/// Serialized as a plain number, or `{"type": "Default"}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LineWidthRepr", into = "LineWidthRepr")]
pub enum LineWidth {
    #[default]
    Default,
    Pixels(f64),
}

impl LineWidth {
    /// A numeric width, which must be finite and strictly positive
    pub fn pixels(width: f64) -> Result<Self> {
        if width.is_finite() && width > 0.0 {
            Ok(LineWidth::Pixels(width))
        } else {
            Err(DisplayError::InvalidAttribute(format!(
                "line width must be a positive number. Got {}",
                width
            )))
        }
    }

    pub fn as_pixels(&self) -> Option<f64> {
        match self {
            LineWidth::Default => None,
            LineWidth::Pixels(px) => Some(*px),
        }
    }
}

impl FromStr for LineWidth {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim();
        if clean.eq_ignore_ascii_case("default") {
            return Ok(LineWidth::Default);
        }
        let width = clean.parse::<f64>().map_err(|_| {
            DisplayError::InvalidAttribute(format!(
                "line width '{}' is not a number or 'Default'",
                s
            ))
        })?;
        LineWidth::pixels(width)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LineWidthRepr {
    Pixels(f64),
    Alt {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl TryFrom<LineWidthRepr> for LineWidth {
    type Error = DisplayError;

    fn try_from(value: LineWidthRepr) -> Result<Self> {
        match value {
            LineWidthRepr::Pixels(px) => LineWidth::pixels(px),
            LineWidthRepr::Alt { kind } if kind == "Default" => Ok(LineWidth::Default),
            LineWidthRepr::Alt { kind } => Err(DisplayError::InvalidAttribute(format!(
                "line width type '{}' is not recognized",
                kind
            ))),
        }
    }
}

impl From<LineWidth> for LineWidthRepr {
    fn from(value: LineWidth) -> Self {
        match value {
            LineWidth::Default => LineWidthRepr::Alt {
                kind: "Default".to_string(),
            },
            LineWidth::Pixels(px) => LineWidthRepr::Pixels(px),
        }
    }
}

/// Radius of drawn points in pixels, which must be finite and strictly positive
pub fn point_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(DisplayError::InvalidAttribute(format!(
            "point radius must be a positive number. Got {}",
            radius
        )))
    }
}

fn parse_point_radius(s: &str) -> Result<f64> {
    let radius = s.trim().parse::<f64>().map_err(|_| {
        DisplayError::InvalidAttribute(format!("point radius '{}' is not a number", s))
    })?;
    point_radius(radius)
}

fn deserialize_radius<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(point_radius)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Display properties of one geometry object
///
/// `radius` only affects points; None leaves the size to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayAttributes {
    color: Color,
    line_width: LineWidth,
    line_type: LineType,
    display_mode: DisplayMode,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_radius"
    )]
    radius: Option<f64>,
}

impl DisplayAttributes {
    /// Create attributes, validating the line width
    pub fn new(
        color: Color,
        line_width: LineWidth,
        line_type: LineType,
        display_mode: DisplayMode,
    ) -> Result<Self> {
        if let LineWidth::Pixels(px) = line_width {
            LineWidth::pixels(px)?;
        }
        Ok(DisplayAttributes {
            color,
            line_width,
            line_type,
            display_mode,
            radius: None,
        })
    }

    /// Build attributes from textual options; unset options keep their defaults
    pub fn from_options(options: &AttributeOptions) -> Result<Self> {
        AttributeOverride::from_options(options).map(|o| o.apply(&DisplayAttributes::default()))
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_width(&self) -> LineWidth {
        self.line_width
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn with_color(self, color: Color) -> Self {
        DisplayAttributes { color, ..self }
    }

    pub fn with_line_width(self, width: f64) -> Result<Self> {
        Ok(DisplayAttributes {
            line_width: LineWidth::pixels(width)?,
            ..self
        })
    }

    pub fn with_line_type(self, line_type: LineType) -> Self {
        DisplayAttributes { line_type, ..self }
    }

    pub fn with_display_mode(self, display_mode: DisplayMode) -> Self {
        DisplayAttributes {
            display_mode,
            ..self
        }
    }

    pub fn with_radius(self, radius: f64) -> Result<Self> {
        Ok(DisplayAttributes {
            radius: Some(point_radius(radius)?),
            ..self
        })
    }
}

/// Unparsed attribute options, as received from a caller's configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeOptions {
    pub color: Option<String>,
    pub line_width: Option<String>,
    pub line_type: Option<String>,
    pub display_mode: Option<String>,
    pub radius: Option<String>,
}

/// A partial set of attributes that replaces fields of a base set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeOverride {
    pub color: Option<Color>,
    pub line_width: Option<LineWidth>,
    pub line_type: Option<LineType>,
    pub display_mode: Option<DisplayMode>,
    #[serde(default, deserialize_with = "deserialize_radius")]
    pub radius: Option<f64>,
}

impl AttributeOverride {
    /// Override with validated values
    pub fn new(
        color: Option<Color>,
        line_width: Option<LineWidth>,
        line_type: Option<LineType>,
        display_mode: Option<DisplayMode>,
    ) -> Result<Self> {
        if let Some(LineWidth::Pixels(px)) = line_width {
            LineWidth::pixels(px)?;
        }
        Ok(AttributeOverride {
            color,
            line_width,
            line_type,
            display_mode,
            radius: None,
        })
    }

    pub fn color(color: Color) -> Self {
        AttributeOverride {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn radius(radius: f64) -> Result<Self> {
        Ok(AttributeOverride {
            radius: Some(point_radius(radius)?),
            ..Default::default()
        })
    }

    /// Parse textual options; empty strings count as unset
    pub fn from_options(options: &AttributeOptions) -> Result<Self> {
        fn set(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        Ok(AttributeOverride {
            radius: set(&options.radius).map(parse_point_radius).transpose()?,
            ..AttributeOverride::new(
                set(&options.color).map(Color::parse).transpose()?,
                set(&options.line_width).map(str::parse).transpose()?,
                set(&options.line_type).map(str::parse).transpose()?,
                set(&options.display_mode).map(str::parse).transpose()?,
            )?
        })
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.line_width.is_none()
            && self.line_type.is_none()
            && self.display_mode.is_none()
            && self.radius.is_none()
    }

    /// Replace the fields of `base` that this override sets
    pub fn apply(&self, base: &DisplayAttributes) -> DisplayAttributes {
        DisplayAttributes {
            color: self.color.unwrap_or(base.color),
            line_width: self.line_width.unwrap_or(base.line_width),
            line_type: self.line_type.unwrap_or(base.line_type),
            display_mode: self.display_mode.unwrap_or(base.display_mode),
            radius: self.radius.or(base.radius),
        }
    }

    /// Combine two overrides, with `other` winning where both are set
    pub fn merge(&self, other: &AttributeOverride) -> AttributeOverride {
        AttributeOverride {
            color: other.color.or(self.color),
            line_width: other.line_width.or(self.line_width),
            line_type: other.line_type.or(self.line_type),
            display_mode: other.display_mode.or(self.display_mode),
            radius: other.radius.or(self.radius),
        }
    }
}
