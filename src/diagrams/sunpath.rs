//! Sun positions and sun path geometry
//!
//! Solar positions follow the NOAA solar calculator equations (julian century,
//! equation of time, declination, hour angle) for a fixed non-leap year, with
//! the usual correction for atmospheric refraction.

use super::dt::{Date, DateTime, DAYS_IN_MONTH};
use crate::display::error::{DisplayError, Result};
use crate::geometry::{Arc3D, Point2D, Point3D, Polyline3D, Vector3D};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Julian day at midnight UTC on the first of January of the reference year
const JULIAN_DAY_JAN_1: f64 = 2_457_754.5;

/// Solar zenith at sunrise and sunset, including refraction and the solar disc
const SUNRISE_ZENITH: f64 = 90.833;

/// Projection from the sky hemisphere onto the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    Orthographic,
    Stereographic,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Orthographic => "Orthographic",
            Projection::Stereographic => "Stereographic",
        }
    }

    /// Project a unit vector of the upper hemisphere onto the plane
    pub fn project(&self, v: &Vector3D) -> Point2D {
        match self {
            Projection::Orthographic => Point2D::new(v.x, v.y),
            Projection::Stereographic => {
                let scale = 1.0 / (1.0 + v.z);
                Point2D::new(v.x * scale, v.y * scale)
            }
        }
    }
}

impl FromStr for Projection {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "orthographic" => Ok(Projection::Orthographic),
            "stereographic" => Ok(Projection::Stereographic),
            _ => Err(DisplayError::InvalidAttribute(format!(
                "Unknown projection '{}': expected Orthographic or Stereographic",
                s
            ))),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of the sun at one moment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub datetime: DateTime,
    /// Degrees above the horizon
    pub altitude: f64,
    /// Degrees clockwise from north
    pub azimuth: f64,
    /// Counterclockwise rotation of north from the Y axis, in degrees
    pub north_angle: f64,
    pub is_solar_time: bool,
}

impl Sun {
    pub fn is_during_day(&self) -> bool {
        self.altitude > 0.0
    }

    pub fn hoy(&self) -> f64 {
        self.datetime.hoy()
    }

    /// Unit vector pointing from the ground toward the sun
    pub fn sun_vector_reversed(&self) -> Vector3D {
        let alt = self.altitude.to_radians();
        let az = self.azimuth.to_radians();
        Vector3D::new(az.sin() * alt.cos(), az.cos() * alt.cos(), alt.sin())
            .rotate_xy(self.north_angle.to_radians())
    }

    /// Sun position on a sky dome of a given radius
    pub fn position_3d(&self, origin: &Point3D, radius: f64) -> Point3D {
        *origin + self.sun_vector_reversed() * radius
    }

    /// Sun position projected onto the plane of a sky dome's base
    pub fn position_2d(&self, projection: Projection, origin: &Point2D, radius: f64) -> Point2D {
        let p = projection.project(&self.sun_vector_reversed());
        Point2D::new(origin.x + p.x * radius, origin.y + p.y * radius)
    }
}

/// Declination and equation of time for a moment of the year
struct SolarGeometry {
    declination: f64,
    equation_of_time: f64,
}

/// Sun path for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sunpath {
    pub latitude: f64,
    pub longitude: f64,
    /// Hours offset from UTC
    pub time_zone: f64,
    pub north_angle: f64,
    /// Start and end hour of year of the daylight saving period
    #[serde(default)]
    pub daylight_saving: Option<(f64, f64)>,
}

impl Sunpath {
    pub fn new(latitude: f64, longitude: f64, time_zone: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DisplayError::Translation(format!(
                "Latitude {} is outside [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DisplayError::Translation(format!(
                "Longitude {} is outside [-180, 180]",
                longitude
            )));
        }
        if !(-12.0..=14.0).contains(&time_zone) {
            return Err(DisplayError::Translation(format!(
                "Time zone {} is outside [-12, 14]",
                time_zone
            )));
        }
        Ok(Sunpath {
            latitude,
            longitude,
            time_zone,
            north_angle: 0.0,
            daylight_saving: None,
        })
    }

    pub fn with_north_angle(mut self, north_angle: f64) -> Self {
        self.north_angle = north_angle;
        self
    }

    pub fn with_daylight_saving(mut self, start_hoy: f64, end_hoy: f64) -> Result<Self> {
        DateTime::from_hoy(start_hoy)?;
        DateTime::from_hoy(end_hoy)?;
        self.daylight_saving = Some((start_hoy, end_hoy));
        Ok(self)
    }

    /// Copy of this sun path without daylight saving
    pub fn without_daylight_saving(&self) -> Sunpath {
        Sunpath {
            daylight_saving: None,
            ..self.clone()
        }
    }

    fn is_daylight_saving_hour(&self, hoy: f64) -> bool {
        match self.daylight_saving {
            Some((start, end)) if start <= end => hoy >= start && hoy < end,
            // Southern hemisphere periods wrap around the new year
            Some((start, end)) => hoy >= start || hoy < end,
            None => false,
        }
    }

    /// Sun at a month, day and hour of the day
    pub fn calculate_sun(&self, month: u32, day: u32, hour: f64, solar_time: bool) -> Result<Sun> {
        let date = Date::new(month, day)?;
        if !(0.0..24.0).contains(&hour) {
            return Err(DisplayError::Translation(format!(
                "Invalid hour {}: expected 0 to 24",
                hour
            )));
        }
        self.calculate_sun_from_hoy((date.doy() - 1) as f64 * 24.0 + hour, solar_time)
    }

    /// Sun at an hour of the year
    pub fn calculate_sun_from_hoy(&self, hoy: f64, solar_time: bool) -> Result<Sun> {
        let datetime = DateTime::from_hoy(hoy)?;
        let mut clock_hoy = datetime.hoy();
        if !solar_time && self.is_daylight_saving_hour(clock_hoy) {
            clock_hoy -= 1.0;
        }
        let (doy, minutes) = if clock_hoy < 0.0 {
            (365, (clock_hoy + 24.0) * 60.0)
        } else {
            let doy = (clock_hoy / 24.0).floor() as u32 + 1;
            (doy, (clock_hoy - (doy - 1) as f64 * 24.0) * 60.0)
        };
        Ok(self.sun_at(datetime, doy, minutes, solar_time))
    }

    fn solar_geometry(&self, doy: u32, minutes: f64) -> SolarGeometry {
        let julian_day =
            JULIAN_DAY_JAN_1 + (doy - 1) as f64 + minutes / 1440.0 - self.time_zone / 24.0;
        let jc = (julian_day - 2_451_545.0) / 36_525.0;

        let mean_long = (280.46646 + jc * (36000.76983 + jc * 0.0003032)).rem_euclid(360.0);
        let mean_anom = 357.52911 + jc * (35999.05029 - 0.0001537 * jc);
        let eccent = 0.016708634 - jc * (0.000042037 + 0.0000001267 * jc);

        let anom = mean_anom.to_radians();
        let eq_of_ctr = anom.sin() * (1.914602 - jc * (0.004817 + 0.000014 * jc))
            + (2.0 * anom).sin() * (0.019993 - 0.000101 * jc)
            + (3.0 * anom).sin() * 0.000289;
        let true_long = mean_long + eq_of_ctr;
        let omega = (125.04 - 1934.136 * jc).to_radians();
        let app_long = true_long - 0.00569 - 0.00478 * omega.sin();

        let mean_obliq =
            23.0 + (26.0 + (21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001813))) / 60.0) / 60.0;
        let obliq = mean_obliq + 0.00256 * omega.cos();

        let declination = (obliq.to_radians().sin() * app_long.to_radians().sin())
            .asin()
            .to_degrees();

        let var_y = (obliq.to_radians() / 2.0).tan().powi(2);
        let l0 = mean_long.to_radians();
        let equation_of_time = 4.0
            * (var_y * (2.0 * l0).sin() - 2.0 * eccent * anom.sin()
                + 4.0 * eccent * var_y * anom.sin() * (2.0 * l0).cos()
                - 0.5 * var_y * var_y * (4.0 * l0).sin()
                - 1.25 * eccent * eccent * (2.0 * anom).sin())
            .to_degrees();

        SolarGeometry {
            declination,
            equation_of_time,
        }
    }

    /// Sun for a day of year and minutes past midnight (clock or solar time)
    fn sun_at(&self, datetime: DateTime, doy: u32, minutes: f64, solar_time: bool) -> Sun {
        let geo = self.solar_geometry(doy, minutes);
        let true_solar_minutes = if solar_time {
            minutes
        } else {
            (minutes + geo.equation_of_time + 4.0 * self.longitude - 60.0 * self.time_zone)
                .rem_euclid(1440.0)
        };
        let hour_angle = if true_solar_minutes / 4.0 < 0.0 {
            true_solar_minutes / 4.0 + 180.0
        } else {
            true_solar_minutes / 4.0 - 180.0
        };

        let lat = self.latitude.to_radians();
        let dec = geo.declination.to_radians();
        let cos_zenith = (lat.sin() * dec.sin()
            + lat.cos() * dec.cos() * hour_angle.to_radians().cos())
        .clamp(-1.0, 1.0);
        let zenith = cos_zenith.acos();
        let altitude = 90.0 - zenith.to_degrees() + refraction(90.0 - zenith.to_degrees());

        let denominator = lat.cos() * zenith.sin();
        let azimuth = if denominator.abs() < 1e-12 {
            if hour_angle > 0.0 {
                270.0
            } else {
                90.0
            }
        } else {
            let cos_az = ((lat.sin() * zenith.cos() - dec.sin()) / denominator).clamp(-1.0, 1.0);
            let angle = cos_az.acos().to_degrees();
            if hour_angle > 0.0 {
                (angle + 180.0).rem_euclid(360.0)
            } else {
                (540.0 - angle).rem_euclid(360.0)
            }
        };

        Sun {
            datetime,
            altitude,
            azimuth,
            north_angle: self.north_angle,
            is_solar_time: solar_time,
        }
    }

    /// Sunrise, solar noon and sunset in minutes past midnight
    ///
    /// Returns `Err(true)` for a polar day and `Err(false)` for a polar night.
    fn sun_events(&self, doy: u32, solar_time: bool) -> std::result::Result<[f64; 3], bool> {
        let geo = self.solar_geometry(doy, 720.0);
        let lat = self.latitude.to_radians();
        let dec = geo.declination.to_radians();
        let cos_ha = SUNRISE_ZENITH.to_radians().cos() / (lat.cos() * dec.cos())
            - lat.tan() * dec.tan();
        if !cos_ha.is_finite() || cos_ha > 1.0 {
            return Err(false);
        }
        if cos_ha < -1.0 {
            return Err(true);
        }
        let ha_minutes = cos_ha.acos().to_degrees() * 4.0;
        let noon = if solar_time {
            720.0
        } else {
            720.0 - 4.0 * self.longitude - geo.equation_of_time + self.time_zone * 60.0
        };
        Ok([noon - ha_minutes, noon, noon + ha_minutes])
    }

    fn sun_on_day(&self, date: Date, minutes: f64, solar_time: bool) -> Result<Sun> {
        let wrapped = minutes.rem_euclid(1440.0);
        let moy = (date.doy() - 1) * 1440 + (wrapped.round() as u32).min(1439);
        let datetime = DateTime::from_moy(moy)?;
        Ok(self.sun_at(datetime, date.doy(), minutes, solar_time))
    }

    /// Arc of the sun across the sky dome on one day
    ///
    /// The arc runs through sunrise, solar noon and sunset. Polar days give a
    /// full circle and polar nights give None.
    pub fn day_arc3d(
        &self,
        month: u32,
        day: u32,
        origin: &Point3D,
        radius: f64,
    ) -> Result<Option<Arc3D>> {
        let date = Date::new(month, day)?;
        let (minutes, circle) = match self.sun_events(date.doy(), false) {
            Ok(events) => (events, false),
            Err(true) => ([0.0, 480.0, 960.0], true),
            Err(false) => return Ok(None),
        };

        let mut points = Vec::with_capacity(3);
        for m in minutes {
            points.push(self.sun_on_day(date, m, false)?.position_3d(origin, radius));
        }
        Ok(Arc3D::from_start_mid_end(points[0], points[1], points[2], circle))
    }

    /// Daily sun path projected onto the base plane
    pub fn day_polyline2d(
        &self,
        month: u32,
        day: u32,
        projection: Projection,
        origin: &Point3D,
        radius: f64,
        divisions: usize,
    ) -> Result<Option<Vec<Point2D>>> {
        Ok(self
            .day_arc3d(month, day, origin, radius)?
            .map(|arc| project_points(&arc.subdivide(divisions), projection, origin, radius)))
    }

    /// Daily arcs for the 21st of every month (polar nights are skipped)
    pub fn monthly_day_arc3d(&self, origin: &Point3D, radius: f64) -> Result<Vec<Arc3D>> {
        let mut arcs = Vec::with_capacity(12);
        for month in 1..=12 {
            if let Some(arc) = self.day_arc3d(month, 21, origin, radius)? {
                arcs.push(arc);
            }
        }
        Ok(arcs)
    }

    pub fn monthly_day_polyline2d(
        &self,
        projection: Projection,
        origin: &Point3D,
        radius: f64,
        divisions: usize,
    ) -> Result<Vec<Vec<Point2D>>> {
        Ok(self
            .monthly_day_arc3d(origin, radius)?
            .iter()
            .map(|arc| project_points(&arc.subdivide(divisions), projection, origin, radius))
            .collect())
    }

    /// Suns of each hour of the day, sampled across a range of months
    fn analemma_suns(
        &self,
        daytime_only: bool,
        solar_time: bool,
        start_month: u32,
        end_month: u32,
        steps_per_month: u32,
    ) -> Result<Vec<Vec<Sun>>> {
        if !(1..=12).contains(&start_month) || !(1..=12).contains(&end_month) {
            return Err(DisplayError::Translation(format!(
                "Invalid analemma months {} to {}",
                start_month, end_month
            )));
        }
        if start_month > end_month || steps_per_month == 0 {
            return Err(DisplayError::Translation(format!(
                "Analemma needs a forward month range and at least one step per month \
                 (got months {} to {}, {} steps)",
                start_month, end_month, steps_per_month
            )));
        }

        let mut dates = Vec::new();
        for month in start_month..=end_month {
            let days = DAYS_IN_MONTH[(month - 1) as usize];
            for step in 0..steps_per_month {
                dates.push(Date::new(month, 1 + step * days / steps_per_month)?);
            }
        }

        let mut analemmas = Vec::with_capacity(24);
        for hour in 0..24 {
            let suns = dates
                .iter()
                .map(|date| self.sun_on_day(*date, hour as f64 * 60.0, solar_time))
                .collect::<Result<Vec<_>>>()?;
            if daytime_only && !suns.iter().all(Sun::is_during_day) {
                continue;
            }
            analemmas.push(suns);
        }
        tracing::debug!(
            "Computed {} analemmas for months {} to {}",
            analemmas.len(),
            start_month,
            end_month
        );
        Ok(analemmas)
    }

    /// One analemma polyline per hour of the day
    ///
    /// With `daytime_only`, an analemma is kept only when all of its samples
    /// are above the horizon.
    #[allow(clippy::too_many_arguments)]
    pub fn hourly_analemma_polyline3d(
        &self,
        origin: &Point3D,
        radius: f64,
        daytime_only: bool,
        solar_time: bool,
        start_month: u32,
        end_month: u32,
        steps_per_month: u32,
    ) -> Result<Vec<Polyline3D>> {
        Ok(self
            .analemma_suns(daytime_only, solar_time, start_month, end_month, steps_per_month)?
            .iter()
            .map(|suns| {
                Polyline3D::new(suns.iter().map(|s| s.position_3d(origin, radius)).collect())
            })
            .collect())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn hourly_analemma_polyline2d(
        &self,
        projection: Projection,
        origin: &Point3D,
        radius: f64,
        daytime_only: bool,
        solar_time: bool,
        start_month: u32,
        end_month: u32,
        steps_per_month: u32,
    ) -> Result<Vec<Vec<Point2D>>> {
        let base = Point2D::new(origin.x, origin.y);
        Ok(self
            .analemma_suns(daytime_only, solar_time, start_month, end_month, steps_per_month)?
            .iter()
            .map(|suns| {
                suns.iter()
                    .map(|s| s.position_2d(projection, &base, radius))
                    .collect()
            })
            .collect())
    }
}

/// Project points of a sky dome onto its base plane
fn project_points(
    points: &[Point3D],
    projection: Projection,
    origin: &Point3D,
    radius: f64,
) -> Vec<Point2D> {
    points
        .iter()
        .map(|p| {
            let v = (*p - *origin) * (1.0 / radius);
            let flat = projection.project(&v);
            Point2D::new(origin.x + flat.x * radius, origin.y + flat.y * radius)
        })
        .collect()
}

/// Atmospheric refraction correction in degrees for an apparent altitude
fn refraction(altitude: f64) -> f64 {
    if altitude > 85.0 {
        return 0.0;
    }
    let tan = altitude.to_radians().tan();
    let arc_seconds = if altitude > 5.0 {
        58.1 / tan - 0.07 / tan.powi(3) + 0.000086 / tan.powi(5)
    } else if altitude > -0.575 {
        1735.0 + altitude * (-518.2 + altitude * (103.4 + altitude * (-12.79 + altitude * 0.711)))
    } else {
        -20.772 / tan
    };
    arc_seconds / 3600.0
}
