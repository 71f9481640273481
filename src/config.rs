//! Translation configuration from properties
//!
//! Configuration is loaded from properties declared in display.json. All
//! default values come from display.json; this module holds no fallbacks of
//! its own.

use crate::diagrams::{Compass, Date, Projection, Sunpath, WindRose};
use crate::display::error::{DisplayError, Result};
use crate::display::properties::PropertyReader;
use crate::extension::{CompassOptions, StyleOverrides, SunpathOptions};
use crate::geometry::{Point2D, Point3D};

/// Which diagram to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramKind {
    #[default]
    Sunpath,
    WindRose,
    Compass,
}

impl DiagramKind {
    /// Parse from string value
    ///
    /// Validation against the declared values happens in PropertyReader::get_enum.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "windrose" => Self::WindRose,
            "compass" => Self::Compass,
            _ => Self::Sunpath,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationConfig {
    pub diagram: DiagramKind,

    /// Attribute overrides (global and per element role)
    pub styles: StyleOverrides,

    /// Site latitude in degrees [-90, 90]
    pub latitude: f64,

    /// Site longitude in degrees [-180, 180]
    pub longitude: f64,

    /// Hours offset from UTC [-12, 14]
    pub time_zone: f64,

    /// Counterclockwise rotation of north from the Y axis in degrees
    pub north_angle: f64,

    /// Radius of the sun path or compass
    pub radius: f64,

    /// Center of the diagram (only the elevation is configurable)
    pub center: Point3D,

    /// Projection for flat diagrams; None draws a 3D sun path
    pub projection: Option<Projection>,

    pub solar_time: bool,
    pub daily: bool,
    pub sun_spheres: bool,

    /// Hours of the year to plot, from the month/day/hour properties
    pub hoys: Vec<f64>,

    /// Number of wind rose direction bins
    pub direction_count: usize,

    /// Hours represented by each wind rose ring
    pub frequency_hours: f64,

    /// Distance between wind rose rings
    pub frequency_spacing: f64,

    /// City name used in the wind rose identifier
    pub city: Option<String>,

    /// Compass labels replacing the cardinal directions
    pub custom_angles: Option<Vec<f64>>,

    pub font: String,
}

impl TranslationConfig {
    /// Create config from properties
    ///
    /// Attribute overrides are validated strictly; other invalid values fall
    /// back to their display.json defaults with a warning.
    pub fn from_properties(props: &PropertyReader) -> Result<Self> {
        let diagram = DiagramKind::parse(&props.get_enum("diagram"));
        let styles = StyleOverrides::from_properties(props)?;

        let projection = match props.get_enum("projection").as_str() {
            p if p.eq_ignore_ascii_case("none") || p.is_empty() => None,
            p => Some(p.parse::<Projection>()?),
        };

        let hoys = Self::hoys_from_properties(props)?;

        let direction_count = match usize::try_from(props.get_i32("direction_count")) {
            Ok(n) => n,
            Err(_) => {
                return Err(DisplayError::Config(
                    "direction_count must not be negative".to_string(),
                ))
            }
        };

        let config = Self {
            diagram,
            styles,
            latitude: props.get_f64_in_range("latitude", -90.0, 90.0),
            longitude: props.get_f64_in_range("longitude", -180.0, 180.0),
            time_zone: props.get_f64_in_range("time_zone", -12.0, 14.0),
            north_angle: props.get_f64("north_angle"),
            radius: props.get_f64_in_range("radius", f64::MIN_POSITIVE, f64::MAX),
            center: Point3D::new(0.0, 0.0, props.get_f64("center_z")),
            projection,
            solar_time: props.get_bool("solar_time"),
            daily: props.get_bool("daily"),
            sun_spheres: props.get_bool("sun_spheres"),
            hoys,
            direction_count,
            frequency_hours: props.get_f64_in_range("frequency_hours", f64::MIN_POSITIVE, f64::MAX),
            frequency_spacing: props.get_f64_in_range(
                "frequency_spacing",
                f64::MIN_POSITIVE,
                f64::MAX,
            ),
            city: props.get_optional_string("city"),
            custom_angles: props.get_f64_list("custom_angles")?,
            font: props.get_string("font"),
        };

        tracing::debug!("Translation config: {:?}", config);
        Ok(config)
    }

    /// Hours of the year covered by the month/day/hour properties
    ///
    /// Without a month no hours are plotted. The end date defaults to the
    /// start date, and every day in between gets the same hour range.
    fn hoys_from_properties(props: &PropertyReader) -> Result<Vec<f64>> {
        let month = match props.get_optional_i32("month") {
            Some(m) => m,
            None => return Ok(Vec::new()),
        };
        let day = props.get_i32("day");
        let end_month = props.get_optional_i32("end_month").unwrap_or(month);
        let end_day = props.get_optional_i32("end_day").unwrap_or(day);

        let to_u32 = |value: i32, name: &str| {
            u32::try_from(value)
                .map_err(|_| DisplayError::Config(format!("{} must not be negative", name)))
        };
        let start = Date::new(to_u32(month, "month")?, to_u32(day, "day")?)?;
        let end = Date::new(to_u32(end_month, "end_month")?, to_u32(end_day, "end_day")?)?;
        if end.doy() < start.doy() {
            return Err(DisplayError::Config(format!(
                "End date {} comes before start date {}",
                end, start
            )));
        }

        let start_hour = props.get_i32("start_hour").clamp(0, 23) as u32;
        let end_hour = props.get_i32("end_hour").clamp(0, 23) as u32;
        if end_hour < start_hour {
            return Err(DisplayError::Config(format!(
                "End hour {} comes before start hour {}",
                end_hour, start_hour
            )));
        }

        Ok((start.doy()..=end.doy())
            .flat_map(|doy| {
                (start_hour..=end_hour).map(move |hour| ((doy - 1) * 24 + hour) as f64)
            })
            .collect())
    }

    pub fn sunpath(&self) -> Result<Sunpath> {
        Ok(Sunpath::new(self.latitude, self.longitude, self.time_zone)?
            .with_north_angle(self.north_angle))
    }

    pub fn sunpath_options(&self) -> SunpathOptions {
        SunpathOptions {
            hoys: self.hoys.clone(),
            radius: self.radius,
            center: self.center,
            solar_time: self.solar_time,
            daily: self.daily,
            projection: self.projection,
            sun_spheres: self.sun_spheres,
            ..Default::default()
        }
    }

    pub fn compass(&self) -> Result<Compass> {
        Compass::new(
            self.radius,
            Point2D::new(self.center.x, self.center.y),
            self.north_angle,
        )
    }

    pub fn compass_options(&self) -> CompassOptions {
        CompassOptions {
            z: self.center.z,
            custom_angles: self.custom_angles.clone(),
            projection: self.projection,
            font: self.font.clone(),
        }
    }

    /// Wind rose over direction and value series, with the configured layout
    pub fn windrose(&self, directions: Vec<f64>, values: Vec<f64>) -> Result<WindRose> {
        let mut windrose = WindRose::new(directions, values)?
            .with_direction_count(self.direction_count)?
            .with_frequency_hours(self.frequency_hours)?
            .with_frequency_spacing_distance(self.frequency_spacing)?
            .with_north_angle(self.north_angle)
            .with_base_point(Point2D::new(self.center.x, self.center.y));
        if let Some(city) = &self.city {
            windrose = windrose.with_metadata("city", city.as_str());
        }
        Ok(windrose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_registry() {
        let config = TranslationConfig::from_properties(&PropertyReader::default()).unwrap();
        assert_eq!(config.diagram, DiagramKind::Sunpath);
        assert_eq!(config.radius, 100.0);
        assert_eq!(config.projection, None);
        assert!(config.hoys.is_empty());
        assert!(config.styles.is_empty());
        assert_eq!(config.direction_count, 36);
        assert_eq!(config.frequency_hours, 50.0);
        assert_eq!(config.font, "Arial");
        assert!(!config.daily);
    }

    #[test]
    fn test_sunpath_properties() {
        let props = PropertyReader::from_pairs([
            ("latitude", "42.36"),
            ("longitude", "-71.06"),
            ("time_zone", "-5"),
            ("projection", "Stereographic"),
            ("daily", "true"),
            ("month", "6"),
            ("day", "21"),
            ("end_day", "22"),
            ("start_hour", "6"),
            ("end_hour", "18"),
            ("center_z", "3"),
        ]);
        let config = TranslationConfig::from_properties(&props).unwrap();
        assert_eq!(config.projection, Some(Projection::Stereographic));
        assert_eq!(config.hoys.len(), 2 * 13);
        assert_eq!(config.hoys[0], 171.0 * 24.0 + 6.0);
        assert_eq!(config.center.z, 3.0);

        let options = config.sunpath_options();
        assert!(options.daily);
        assert_eq!(options.hoys, config.hoys);
        assert_eq!(config.sunpath().unwrap().latitude, 42.36);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let props = PropertyReader::from_pairs([
            ("diagram", "radar"),
            ("latitude", "100"),
            ("radius", "-5"),
        ]);
        let config = TranslationConfig::from_properties(&props).unwrap();
        assert_eq!(config.diagram, DiagramKind::Sunpath);
        assert_eq!(config.latitude, 0.0);
        assert_eq!(config.radius, 100.0);
    }

    #[test]
    fn test_invalid_dates_and_styles_fail() {
        let backwards = PropertyReader::from_pairs([("month", "6"), ("end_month", "5")]);
        assert!(TranslationConfig::from_properties(&backwards).is_err());

        let bad_day = PropertyReader::from_pairs([("month", "2"), ("day", "30")]);
        assert!(TranslationConfig::from_properties(&bad_day).is_err());

        let bad_color = PropertyReader::from_pairs([("color", "#12")]);
        assert!(matches!(
            TranslationConfig::from_properties(&bad_color),
            Err(DisplayError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_windrose_and_compass_settings() {
        let props = PropertyReader::from_pairs([
            ("diagram", "windrose"),
            ("direction_count", "8"),
            ("frequency_hours", "10"),
            ("city", "Boston"),
            ("custom_angles", "0,90,180,270"),
        ]);
        let config = TranslationConfig::from_properties(&props).unwrap();
        assert_eq!(config.diagram, DiagramKind::WindRose);
        let rose = config.windrose(vec![0.0, 90.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(rose.direction_count(), 8);
        assert_eq!(rose.frequency_hours(), 10.0);
        assert_eq!(rose.metadata.get("city").map(String::as_str), Some("Boston"));

        let compass_options = config.compass_options();
        assert_eq!(compass_options.custom_angles.as_ref().map(Vec::len), Some(4));
        assert_eq!(config.compass().unwrap().radius, 100.0);
    }

    #[test]
    fn test_windrose_layout_limits() {
        let too_many = PropertyReader::from_pairs([("direction_count", "400")]);
        let config = TranslationConfig::from_properties(&too_many).unwrap();
        assert!(matches!(
            config.windrose(vec![0.0], vec![1.0]),
            Err(DisplayError::Translation(_))
        ));

        let tiny_rings = PropertyReader::from_pairs([("frequency_hours", "1e-300")]);
        let config = TranslationConfig::from_properties(&tiny_rings).unwrap();
        let rose = config.windrose(vec![0.0, 90.0], vec![1.0, 2.0]).unwrap();
        assert!(matches!(rose.radius(), Err(DisplayError::Translation(_))));
    }
}
