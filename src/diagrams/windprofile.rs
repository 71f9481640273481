//! Wind speed profile over height above the ground
//!
//! Speeds at height come from the meteorological wind speed, measured at
//! `meteorological_height` over `meteorological_terrain`, using the power law
//! (or the log law) for the terrain of the site.

use crate::display::error::{DisplayError, Result};
use crate::geometry::{LineSegment3D, Mesh3D, Plane, Point3D, Polyline3D, Vector3D};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Height step of the profile curve in meters
pub const PROFILE_STEP: f64 = 0.1;

/// Tallest profile drawn, in meters
pub const MAX_PROFILE_HEIGHT: f64 = 10_000.0;

/// Most arrows a profile may draw
pub const MAX_ARROW_COUNT: usize = 1000;

/// Fastest speed the speed axis may be labelled up to, in m/s
pub const MAX_AXIS_SPEED: f64 = 500.0;

const METERS_TO_FEET: f64 = 3.28084;

/// Roughness class of the ground around the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    /// Large city centers
    #[default]
    City,
    /// Urban, suburban and wooded areas
    Suburban,
    /// Open terrain with scattered obstructions
    Country,
    /// Flat, unobstructed areas exposed to wind over water
    Water,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [
        Terrain::City,
        Terrain::Suburban,
        Terrain::Country,
        Terrain::Water,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::City => "city",
            Terrain::Suburban => "suburban",
            Terrain::Country => "country",
            Terrain::Water => "water",
        }
    }

    /// Atmospheric boundary layer thickness in meters
    pub fn boundary_layer_height(&self) -> f64 {
        match self {
            Terrain::City => 460.0,
            Terrain::Suburban => 370.0,
            Terrain::Country => 270.0,
            Terrain::Water => 210.0,
        }
    }

    pub fn power_law_exponent(&self) -> f64 {
        match self {
            Terrain::City => 0.33,
            Terrain::Suburban => 0.22,
            Terrain::Country => 0.14,
            Terrain::Water => 0.10,
        }
    }

    /// Aerodynamic roughness length in meters
    pub fn roughness_length(&self) -> f64 {
        match self {
            Terrain::City => 1.0,
            Terrain::Suburban => 0.5,
            Terrain::Country => 0.1,
            Terrain::Water => 0.0002,
        }
    }
}

impl FromStr for Terrain {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        let clean = s.trim().to_lowercase();
        Terrain::ALL
            .into_iter()
            .find(|t| t.as_str() == clean)
            .ok_or_else(|| {
                DisplayError::Translation(format!(
                    "terrain '{}' is not recognized. Choose from: city, suburban, country, water",
                    s
                ))
            })
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how large a profile is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileLayout {
    /// Ground location of the profile
    pub base_point: Point3D,
    /// Compass direction the profile faces (0 = north, 90 = east); None
    /// lays the profile flat in the XY plane
    pub direction: Option<f64>,
    /// Top of the profile in meters
    pub max_height: f64,
    /// Height between arrows in meters
    pub vector_spacing: f64,
    /// Length of a 1 m/s arrow
    pub vector_length_dimension: f64,
    /// Thickness of the arrows
    pub vector_height_dimension: f64,
    /// Multiplier on every dimension, for models not drawn in meters
    pub scale_factor: f64,
}

impl Default for ProfileLayout {
    fn default() -> Self {
        ProfileLayout {
            base_point: Point3D::default(),
            direction: None,
            max_height: 30.0,
            vector_spacing: 2.0,
            vector_length_dimension: 5.0,
            vector_height_dimension: 1.0,
            scale_factor: 1.0,
        }
    }
}

impl ProfileLayout {
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("max_height", self.max_height),
            ("vector_spacing", self.vector_spacing),
            ("vector_length_dimension", self.vector_length_dimension),
            ("vector_height_dimension", self.vector_height_dimension),
            ("scale_factor", self.scale_factor),
        ];
        if let Some((name, value)) = dims.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Err(DisplayError::Translation(format!(
                "Wind profile {} must be positive, got {}",
                name, value
            )));
        }
        if self.max_height > MAX_PROFILE_HEIGHT {
            return Err(DisplayError::Translation(format!(
                "Wind profile height {} exceeds {} m",
                self.max_height, MAX_PROFILE_HEIGHT
            )));
        }
        if self.max_height < self.vector_spacing
            || self.max_height / self.vector_spacing > MAX_ARROW_COUNT as f64
        {
            return Err(DisplayError::Translation(format!(
                "Spacing {} over a height of {} gives no arrows or more than {}",
                self.vector_spacing, self.max_height, MAX_ARROW_COUNT
            )));
        }
        if let Some(direction) = self.direction.filter(|d| !d.is_finite()) {
            return Err(DisplayError::Translation(format!(
                "Wind profile direction must be a number, got {}",
                direction
            )));
        }
        Ok(())
    }

    /// Unit vectors along the speed axis and the height axis
    pub fn axes(&self) -> (Vector3D, Vector3D) {
        match self.direction {
            None => (Vector3D::X_AXIS, Vector3D::Y_AXIS),
            Some(direction) => {
                let rad = direction.to_radians();
                (Vector3D::new(rad.sin(), rad.cos(), 0.0), Vector3D::Z_AXIS)
            }
        }
    }

    /// Point at a distance along the speed axis and a height, both unscaled
    pub fn point(&self, along: f64, height: f64) -> Point3D {
        let (speed_axis, height_axis) = self.axes();
        self.base_point
            + speed_axis * (along * self.scale_factor)
            + height_axis * (height * self.scale_factor)
    }

    /// Plane of the profile with its X axis along the speed axis
    pub fn plane_at(&self, origin: Point3D) -> Plane {
        let (speed_axis, height_axis) = self.axes();
        Plane::new(speed_axis.cross(&height_axis), origin, Some(speed_axis))
    }

    /// Heights of the arrows, one every `vector_spacing` meters
    pub fn arrow_heights(&self) -> Vec<f64> {
        let count = (self.max_height / self.vector_spacing + 1e-9).floor() as usize;
        (1..=count).map(|i| i as f64 * self.vector_spacing).collect()
    }

    /// Height of axis labels
    pub fn text_height(&self) -> f64 {
        self.vector_spacing * self.scale_factor * 0.5
    }
}

/// Geometry of one chart axis
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileAxis {
    pub line: LineSegment3D,
    /// Triangle at the end of the axis line
    pub arrow: Mesh3D,
    pub ticks: Vec<LineSegment3D>,
    /// Tick labels followed by the axis title
    pub labels: Vec<(String, Plane)>,
}

/// Wind speed as a function of height for a terrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindProfile {
    pub terrain: Terrain,
    pub meteorological_terrain: Terrain,
    meteorological_height: f64,
    pub log_law: bool,
}

impl Default for WindProfile {
    fn default() -> Self {
        WindProfile {
            terrain: Terrain::City,
            meteorological_terrain: Terrain::Country,
            meteorological_height: 10.0,
            log_law: false,
        }
    }
}

impl WindProfile {
    pub fn new(
        terrain: Terrain,
        meteorological_terrain: Terrain,
        meteorological_height: f64,
    ) -> Result<Self> {
        if !meteorological_height.is_finite() || meteorological_height <= 0.0 {
            return Err(DisplayError::Translation(format!(
                "Meteorological height must be positive, got {}",
                meteorological_height
            )));
        }
        Ok(WindProfile {
            terrain,
            meteorological_terrain,
            meteorological_height,
            log_law: false,
        })
    }

    pub fn with_log_law(mut self, log_law: bool) -> Self {
        self.log_law = log_law;
        self
    }

    pub fn meteorological_height(&self) -> f64 {
        self.meteorological_height
    }

    /// Wind speed at a height above the ground (never negative)
    pub fn calculate_wind(&self, meteorological_wind_speed: f64, height: f64) -> f64 {
        if height <= 0.0 {
            return 0.0;
        }
        let met = &self.meteorological_terrain;
        let speed = if self.log_law {
            let z0 = self.terrain.roughness_length();
            let met_z0 = met.roughness_length();
            meteorological_wind_speed * (height / z0).ln()
                / (self.meteorological_height / met_z0).ln()
        } else {
            meteorological_wind_speed
                * (met.boundary_layer_height() / self.meteorological_height)
                    .powf(met.power_law_exponent())
                * (height / self.terrain.boundary_layer_height())
                    .powf(self.terrain.power_law_exponent())
        };
        speed.max(0.0)
    }

    fn check_speed(meteorological_wind_speed: f64) -> Result<()> {
        if !meteorological_wind_speed.is_finite() || meteorological_wind_speed < 0.0 {
            return Err(DisplayError::Translation(format!(
                "Meteorological wind speed must be a non-negative number, got {}",
                meteorological_wind_speed
            )));
        }
        Ok(())
    }

    /// One arrow mesh per arrow height with the wind speed it stands for
    ///
    /// Each arrow is a shaft quad and a head triangle pointing along the
    /// speed axis, as long as the speed times `vector_length_dimension`.
    pub fn mesh_arrows(
        &self,
        meteorological_wind_speed: f64,
        layout: &ProfileLayout,
    ) -> Result<(Vec<Mesh3D>, Vec<f64>)> {
        Self::check_speed(meteorological_wind_speed)?;
        layout.validate()?;

        let thickness = layout.vector_height_dimension;
        let mut arrows = Vec::new();
        let mut speeds = Vec::new();
        for height in layout.arrow_heights() {
            let speed = self.calculate_wind(meteorological_wind_speed, height);
            let length = speed * layout.vector_length_dimension;
            let head = (thickness * 0.5).min(length);
            let shaft_end = length - head;
            let vertices = vec![
                layout.point(0.0, height - thickness / 4.0),
                layout.point(shaft_end, height - thickness / 4.0),
                layout.point(shaft_end, height + thickness / 4.0),
                layout.point(0.0, height + thickness / 4.0),
                layout.point(shaft_end, height - thickness / 2.0),
                layout.point(length, height),
                layout.point(shaft_end, height + thickness / 2.0),
            ];
            arrows.push(Mesh3D::new(vertices, vec![vec![0, 1, 2, 3], vec![4, 5, 6]])?);
            speeds.push(speed);
        }
        Ok((arrows, speeds))
    }

    /// Outline of the speed over height, sampled every `PROFILE_STEP` meters
    pub fn profile_polyline(
        &self,
        meteorological_wind_speed: f64,
        layout: &ProfileLayout,
    ) -> Result<Polyline3D> {
        Self::check_speed(meteorological_wind_speed)?;
        layout.validate()?;
        let steps = (layout.max_height / PROFILE_STEP).round() as usize;
        Ok(Polyline3D::new(
            (0..=steps)
                .map(|i| {
                    let height = (i as f64 * PROFILE_STEP).min(layout.max_height);
                    let speed = self.calculate_wind(meteorological_wind_speed, height);
                    layout.point(speed * layout.vector_length_dimension, height)
                })
                .collect(),
        ))
    }

    /// Speed axis along the ground with a tick and label every 1 m/s
    pub fn speed_axis(&self, max_speed: f64, layout: &ProfileLayout) -> Result<ProfileAxis> {
        layout.validate()?;
        if !max_speed.is_finite() || !(0.0..=MAX_AXIS_SPEED).contains(&max_speed) {
            return Err(DisplayError::Translation(format!(
                "Speed axis maximum must be between 0 and {} m/s, got {}",
                MAX_AXIS_SPEED, max_speed
            )));
        }
        let len_d = layout.vector_length_dimension;
        let txt_h = layout.text_height() / layout.scale_factor;
        let end = (max_speed.floor() + 1.0) * len_d;

        let line = LineSegment3D::new(layout.point(0.0, 0.0), layout.point(end, 0.0));
        let arrow = Mesh3D::new(
            vec![
                layout.point(end, -txt_h / 2.0),
                layout.point(end + txt_h, 0.0),
                layout.point(end, txt_h / 2.0),
            ],
            vec![vec![0, 1, 2]],
        )?;

        let speeds: Vec<u32> = (0..=max_speed.floor() as u32).collect();
        let ticks = speeds
            .iter()
            .map(|s| {
                let x = *s as f64 * len_d;
                LineSegment3D::new(layout.point(x, 0.0), layout.point(x, -txt_h / 2.0))
            })
            .collect();
        let mut labels: Vec<(String, Plane)> = speeds
            .iter()
            .map(|s| {
                let at = layout.point(*s as f64 * len_d, -txt_h);
                (s.to_string(), layout.plane_at(at))
            })
            .collect();
        labels.push((
            "Wind Speed (m/s)".to_string(),
            layout.plane_at(layout.point(end / 2.0, -txt_h * 3.0)),
        ));

        Ok(ProfileAxis {
            line,
            arrow,
            ticks,
            labels,
        })
    }

    /// Height axis at the base point with a tick every `tick_spacing` meters
    pub fn height_axis(
        &self,
        tick_spacing: f64,
        layout: &ProfileLayout,
        feet_labels: bool,
    ) -> Result<ProfileAxis> {
        layout.validate()?;
        if !tick_spacing.is_finite() || tick_spacing <= 0.0 {
            return Err(DisplayError::Translation(format!(
                "Height tick spacing must be positive, got {}",
                tick_spacing
            )));
        }
        let txt_h = layout.text_height() / layout.scale_factor;
        let top = layout.max_height;

        let line = LineSegment3D::new(layout.point(0.0, 0.0), layout.point(0.0, top));
        let arrow = Mesh3D::new(
            vec![
                layout.point(-txt_h / 2.0, top),
                layout.point(txt_h / 2.0, top),
                layout.point(0.0, top + txt_h),
            ],
            vec![vec![0, 1, 2]],
        )?;

        let count = (top / tick_spacing + 1e-9).floor() as usize;
        let heights: Vec<f64> = (0..=count).map(|i| i as f64 * tick_spacing).collect();
        let ticks = heights
            .iter()
            .map(|h| LineSegment3D::new(layout.point(0.0, *h), layout.point(-txt_h / 2.0, *h)))
            .collect();
        let mut labels: Vec<(String, Plane)> = heights
            .iter()
            .map(|h| {
                let text = if feet_labels {
                    format!("{} ft", (h * METERS_TO_FEET).round())
                } else {
                    format!("{} m", h)
                };
                (text, layout.plane_at(layout.point(-txt_h, *h)))
            })
            .collect();
        let title = if feet_labels { "Height (ft)" } else { "Height (m)" };
        labels.push((
            title.to_string(),
            layout.plane_at(layout.point(0.0, top + txt_h * 2.0)),
        ));

        Ok(ProfileAxis {
            line,
            arrow,
            ticks,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_at_meteorological_height() {
        // Same terrain as the station: the station speed is returned at its height
        let profile = WindProfile::new(Terrain::Country, Terrain::Country, 10.0).unwrap();
        assert!((profile.calculate_wind(5.0, 10.0) - 5.0).abs() < 1e-9);
        let log = profile.with_log_law(true);
        assert!((log.calculate_wind(5.0, 10.0) - 5.0).abs() < 1e-9);

        assert_eq!(profile.calculate_wind(5.0, 0.0), 0.0);
        assert!(WindProfile::new(Terrain::City, Terrain::Country, 0.0).is_err());
    }

    #[test]
    fn test_rougher_terrain_is_slower() {
        let city = WindProfile::default();
        let water = WindProfile::new(Terrain::Water, Terrain::Country, 10.0).unwrap();
        assert!(city.calculate_wind(5.0, 10.0) < water.calculate_wind(5.0, 10.0));
        assert!(city.calculate_wind(5.0, 30.0) > city.calculate_wind(5.0, 10.0));
        // Below the roughness length the log law clamps to calm
        let log = city.with_log_law(true);
        assert_eq!(log.calculate_wind(5.0, 0.5), 0.0);
    }

    #[test]
    fn test_terrain_parsing() {
        assert_eq!("Suburban".parse::<Terrain>().unwrap(), Terrain::Suburban);
        assert!("desert".parse::<Terrain>().is_err());
    }

    #[test]
    fn test_mesh_arrows() {
        let layout = ProfileLayout::default();
        let (arrows, speeds) = WindProfile::default().mesh_arrows(5.0, &layout).unwrap();
        assert_eq!(arrows.len(), 15);
        assert_eq!(speeds.len(), 15);
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));

        // Flat layout: the tip of the first arrow sits at speed * length on X
        let tip = arrows[0].vertices[5];
        assert!((tip.x - speeds[0] * 5.0).abs() < 1e-9);
        assert!((tip.y - 2.0).abs() < 1e-9);
        assert_eq!(tip.z, 0.0);
    }

    #[test]
    fn test_facing_east_is_vertical() {
        let layout = ProfileLayout {
            direction: Some(90.0),
            ..Default::default()
        };
        let (arrows, speeds) = WindProfile::default().mesh_arrows(5.0, &layout).unwrap();
        let tip = arrows[0].vertices[5];
        assert!((tip.x - speeds[0] * 5.0).abs() < 1e-9);
        assert!(tip.y.abs() < 1e-9);
        assert!((tip.z - 2.0).abs() < 1e-9);

        let plane = layout.plane_at(Point3D::default());
        assert!((plane.x.x - 1.0).abs() < 1e-9);
        assert!((plane.y().z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_limits() {
        let profile = WindProfile::default();
        let too_dense = ProfileLayout {
            vector_spacing: 0.001,
            ..Default::default()
        };
        assert!(matches!(
            profile.mesh_arrows(5.0, &too_dense),
            Err(DisplayError::Translation(_))
        ));
        let too_short = ProfileLayout {
            max_height: 1.0,
            ..Default::default()
        };
        assert!(profile.mesh_arrows(5.0, &too_short).is_err());
        assert!(profile.mesh_arrows(f64::NAN, &ProfileLayout::default()).is_err());
        assert!(profile.speed_axis(1e9, &ProfileLayout::default()).is_err());
    }

    #[test]
    fn test_axes() {
        let layout = ProfileLayout::default();
        let profile = WindProfile::default();

        let speed = profile.speed_axis(7.0, &layout).unwrap();
        assert_eq!(speed.ticks.len(), 8);
        assert_eq!(speed.labels.len(), 9);
        assert_eq!(speed.labels[7].0, "7");
        assert_eq!(speed.line.p2, Point3D::new(40.0, 0.0, 0.0));

        let height = profile.height_axis(4.0, &layout, false).unwrap();
        assert_eq!(height.ticks.len(), 8);
        assert_eq!(height.labels[1].0, "4 m");
        assert_eq!(height.labels.last().unwrap().0, "Height (m)");
        let feet = profile.height_axis(4.0, &layout, true).unwrap();
        assert_eq!(feet.labels[1].0, "13 ft");

        let outline = profile.profile_polyline(5.0, &layout).unwrap();
        assert_eq!(outline.len(), 301);
        assert_eq!(outline.vertices[0], Point3D::default());
    }
}
