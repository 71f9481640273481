//! Text placed in the 3D scene

use super::curves::Plane;
use crate::display::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// A text string located and oriented by a plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Text3DRepr")]
pub struct Text3D {
    pub text: String,
    pub plane: Plane,
    pub height: f64,
    pub font: String,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

#[derive(Deserialize)]
struct Text3DRepr {
    text: String,
    plane: Plane,
    height: f64,
    font: String,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
}

impl TryFrom<Text3DRepr> for Text3D {
    type Error = DisplayError;

    fn try_from(value: Text3DRepr) -> Result<Self> {
        Ok(Text3D::new(value.text, value.plane, value.height)?
            .with_font(value.font)
            .with_alignment(value.horizontal_alignment, value.vertical_alignment))
    }
}

impl Text3D {
    /// Create left/bottom aligned text in Arial
    pub fn new(text: impl Into<String>, plane: Plane, height: f64) -> Result<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(DisplayError::InvalidGeometry(format!(
                "Text height must be a positive number. Got {}",
                height
            )));
        }
        Ok(Text3D {
            text: text.into(),
            plane,
            height,
            font: "Arial".to_string(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        })
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }
}
