//! Sun path translation
//!
//! A sun path set contains, in order:
//! - `Compass`: the compass at the base of the sky dome
//! - `Analemmas`: one analemma per sun-up hour (yearly mode)
//! - `Daily_Arcs`: arcs for the 21st of each month (yearly mode)
//! - `Sun Paths`: for each day of the requested hours, the day's arc followed
//!   by its sun-up hour points (daily mode)
//! - `Sun_Positions`: sun-up hours as points, or as analysis geometry when
//!   data colors them

use super::compass::{compass_group, CompassOptions};
use super::styles::{ElementRole, StyleOverrides};
use crate::diagrams::{Compass, Date, Projection, Sun, Sunpath};
use crate::display::attributes::{AttributeOverride, LineType, LineWidth};
use crate::display::error::{DisplayError, Result};
use crate::display::DisplayGeometry;
use crate::geometry::{Geometry, Plane, Point2D, Point3D, Polyline3D, Sphere};
use crate::visualization::{
    AnalysisGeometry, ContextGeometry, LegendParameters, VisualizationData, VisualizationSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of segments used for projected daily arcs
const PROJECTED_ARC_DIVISIONS: usize = 30;

/// Samples taken per month along each analemma
const ANALEMMA_STEPS_PER_MONTH: u32 = 4;

/// An hourly data series aligned with the requested hours of the year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunData {
    pub values: Vec<f64>,
    pub data_type: String,
    pub unit: String,
    /// Legend for this series; falls back to the options' legend
    #[serde(default)]
    pub legend_parameters: Option<LegendParameters>,
}

impl SunData {
    pub fn new(values: Vec<f64>, data_type: impl Into<String>, unit: impl Into<String>) -> Self {
        SunData {
            values,
            data_type: data_type.into(),
            unit: unit.into(),
            legend_parameters: None,
        }
    }

    pub fn with_legend_parameters(mut self, legend_parameters: LegendParameters) -> Self {
        self.legend_parameters = Some(legend_parameters);
        self
    }
}

/// Options for drawing a sun path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunpathOptions {
    /// Hours of the year at which sun positions are drawn
    pub hoys: Vec<f64>,
    /// Series colouring the sun positions, one value per hour in `hoys`
    pub data: Vec<SunData>,
    pub legend_parameters: Option<LegendParameters>,
    pub radius: f64,
    pub center: Point3D,
    pub solar_time: bool,
    /// Draw one arc per day of `hoys` instead of the whole year
    pub daily: bool,
    pub projection: Option<Projection>,
    /// Draw suns as spheres instead of points
    pub sun_spheres: bool,
}

impl Default for SunpathOptions {
    fn default() -> Self {
        SunpathOptions {
            hoys: Vec::new(),
            data: Vec::new(),
            legend_parameters: None,
            radius: 100.0,
            center: Point3D::default(),
            solar_time: false,
            daily: false,
            projection: None,
            sun_spheres: false,
        }
    }
}

/// Geometry of a sun at its position on the diagram
fn sun_geometry(sun: &Sun, options: &SunpathOptions) -> Geometry {
    let center = &options.center;
    let point = match options.projection {
        None => sun.position_3d(center, options.radius),
        Some(projection) => {
            let flat =
                sun.position_2d(projection, &Point2D::new(center.x, center.y), options.radius);
            Point3D::from_point2d(&flat, center.z)
        }
    };
    if options.sun_spheres {
        Sphere::new(point, options.radius / 30.0).into()
    } else {
        point.into()
    }
}

fn decorate_sun(sun: &Sun, options: &SunpathOptions, styles: &StyleOverrides) -> DisplayGeometry {
    styles
        .decorate(ElementRole::SunPosition, sun_geometry(sun, options))
        .with_user_data(serde_json::json!({ "hoy": sun.hoy() }))
}

/// Plane that lifts projected 2D points to the elevation of the center
fn base_plane(options: &SunpathOptions) -> Plane {
    Plane::xy(Point3D::new(0.0, 0.0, options.center.z))
}

/// Arc of one day, drawn in 3D or in the requested projection
fn day_arc(
    sunpath: &Sunpath,
    date: Date,
    options: &SunpathOptions,
) -> Result<Option<Geometry>> {
    match options.projection {
        None => Ok(sunpath
            .day_arc3d(date.month, date.day, &options.center, options.radius)?
            .map(Geometry::from)),
        Some(projection) => Ok(sunpath
            .day_polyline2d(
                date.month,
                date.day,
                projection,
                &options.center,
                options.radius,
                PROJECTED_ARC_DIVISIONS,
            )?
            .map(|pts| Polyline3D::from_points_2d(&pts, &base_plane(options)).into())),
    }
}

/// Analemmas for the first and second half of the year
fn analemmas(
    sunpath: &Sunpath,
    options: &SunpathOptions,
    start_month: u32,
    end_month: u32,
) -> Result<Vec<Polyline3D>> {
    match options.projection {
        None => sunpath.hourly_analemma_polyline3d(
            &options.center,
            options.radius,
            true,
            options.solar_time,
            start_month,
            end_month,
            ANALEMMA_STEPS_PER_MONTH,
        ),
        Some(projection) => Ok(sunpath
            .hourly_analemma_polyline2d(
                projection,
                &options.center,
                options.radius,
                true,
                options.solar_time,
                start_month,
                end_month,
                ANALEMMA_STEPS_PER_MONTH,
            )?
            .iter()
            .map(|pts| Polyline3D::from_points_2d(pts, &base_plane(options)))
            .collect()),
    }
}

/// Arcs for the 21st of each month
fn monthly_arcs(sunpath: &Sunpath, options: &SunpathOptions) -> Result<Vec<Geometry>> {
    match options.projection {
        None => Ok(sunpath
            .monthly_day_arc3d(&options.center, options.radius)?
            .into_iter()
            .map(Geometry::from)
            .collect()),
        Some(projection) => Ok(sunpath
            .monthly_day_polyline2d(
                projection,
                &options.center,
                options.radius,
                PROJECTED_ARC_DIVISIONS,
            )?
            .iter()
            .map(|pts| Polyline3D::from_points_2d(pts, &base_plane(options)).into())
            .collect()),
    }
}

/// Structural variation of the i-th monthly arc
///
/// Arcs of the second half of the year are dashed and every sixth arc
/// (the solstices) is drawn wider.
fn monthly_arc_variation(i: usize) -> AttributeOverride {
    AttributeOverride {
        line_width: ((i + 1) % 6 == 0).then_some(LineWidth::Pixels(2.0)),
        line_type: Some(if i <= 5 {
            LineType::Continuous
        } else {
            LineType::Dashed
        }),
        ..Default::default()
    }
}

/// Translate a sun path into a visualization set
pub fn sunpath_to_vis_set(
    sunpath: &Sunpath,
    options: &SunpathOptions,
    styles: &StyleOverrides,
) -> Result<VisualizationSet> {
    if !options.radius.is_finite() || options.radius <= 0.0 {
        return Err(DisplayError::Translation(format!(
            "Sun path radius must be positive, got {}",
            options.radius
        )));
    }
    if options.daily && options.hoys.is_empty() {
        return Err(DisplayError::Translation(
            "A daily sun path needs at least one hour of the year".to_string(),
        ));
    }
    for series in &options.data {
        if series.values.len() != options.hoys.len() {
            return Err(DisplayError::DataMismatch(format!(
                "Data '{}' has {} values but {} hours were requested",
                series.data_type,
                series.values.len(),
                options.hoys.len()
            )));
        }
    }

    let mut vis_set = VisualizationSet::new(format!(
        "Sunpath_{}_{}",
        sunpath.latitude.trunc() as i64,
        sunpath.longitude.trunc() as i64
    ))?
    .with_display_name("Sunpath");

    let center_2d = Point2D::new(options.center.x, options.center.y);
    let compass = Compass::new(options.radius, center_2d, sunpath.north_angle)?;
    let compass_options = CompassOptions {
        z: options.center.z,
        projection: options.projection,
        ..Default::default()
    };
    vis_set.add_group(compass_group(&compass, &compass_options, styles)?)?;

    // Sun-up hours, with their index into the data series
    let mut suns: Vec<(usize, Sun)> = Vec::new();
    for (i, hoy) in options.hoys.iter().enumerate() {
        let sun = sunpath.calculate_sun_from_hoy(*hoy, options.solar_time)?;
        if sun.is_during_day() {
            suns.push((i, sun));
        }
    }
    tracing::debug!(
        "{} of {} requested hours have the sun up",
        suns.len(),
        options.hoys.len()
    );

    // Arcs and analemmas are drawn in standard time
    let drawing_path = sunpath.without_daylight_saving();
    let colored = !options.data.is_empty();

    if !options.daily {
        let mut analemma = Vec::new();
        for (start, end, line_type) in [(1, 6, LineType::Continuous), (7, 12, LineType::Dashed)] {
            let variation = AttributeOverride {
                line_type: Some(line_type),
                ..Default::default()
            };
            for pline in analemmas(&drawing_path, options, start, end)? {
                analemma.push(styles.decorate_with(ElementRole::Analemma, &variation, pline));
            }
        }
        vis_set.add_group(ContextGeometry::new("Analemmas", analemma)?)?;

        let daily_arcs: Vec<DisplayGeometry> = monthly_arcs(&drawing_path, options)?
            .into_iter()
            .enumerate()
            .map(|(i, arc)| {
                styles.decorate_with(ElementRole::DailyArc, &monthly_arc_variation(i), arc)
            })
            .collect();
        if !daily_arcs.is_empty() {
            vis_set.add_group(
                ContextGeometry::new("Daily_Arcs", daily_arcs)?.with_display_name("Daily Arcs"),
            )?;
        }
    } else {
        let dates: BTreeSet<Date> = options
            .hoys
            .iter()
            .map(|hoy| crate::diagrams::DateTime::from_hoy(*hoy).map(|dt| dt.date()))
            .collect::<Result<_>>()?;

        let mut sun_paths = Vec::new();
        for date in dates {
            if let Some(arc) = day_arc(&drawing_path, date, options)? {
                sun_paths.push(styles.decorate(ElementRole::DailyArc, arc));
            }
            if !colored {
                sun_paths.extend(
                    suns.iter()
                        .filter(|(_, sun)| sun.datetime.date() == date)
                        .map(|(_, sun)| decorate_sun(sun, options, styles)),
                );
            }
        }
        if !sun_paths.is_empty() {
            vis_set.add_group(ContextGeometry::new("Sun Paths", sun_paths)?)?;
        }
    }

    if suns.is_empty() {
        return Ok(vis_set);
    }

    if colored {
        let geometry: Vec<Geometry> = suns
            .iter()
            .map(|(_, sun)| sun_geometry(sun, options))
            .collect();
        let mut data_sets = Vec::with_capacity(options.data.len());
        for series in &options.data {
            let legend = series
                .legend_parameters
                .clone()
                .or_else(|| options.legend_parameters.clone())
                .unwrap_or_default();
            let values = suns.iter().map(|(i, _)| series.values[*i]).collect();
            data_sets.push(
                VisualizationData::new(values, legend)?
                    .with_data_type(series.data_type.as_str(), series.unit.as_str()),
            );
        }
        let sun_geo = AnalysisGeometry::new("Sun_Positions", geometry, data_sets)?
            .with_display_name("Sun Positions");
        vis_set.add_group(sun_geo)?;
    } else if !options.daily {
        let points = suns
            .iter()
            .map(|(_, sun)| decorate_sun(sun, options, styles))
            .collect();
        vis_set.add_group(
            ContextGeometry::new("Sun_Positions", points)?.with_display_name("Sun Positions"),
        )?;
    }

    Ok(vis_set)
}
