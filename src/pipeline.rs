//! Shared translation pipeline
//!
//! The pipeline:
//! 1. Builds the diagram requested by the configuration
//! 2. Translates it into a visualization set with the configured styles
//! 3. Serializes the set to JSON for output handling

use crate::config::{DiagramKind, TranslationConfig};
use crate::display::error::{DisplayError, Result};
use crate::extension::ToVisualizationSet;
use crate::visualization::VisualizationSet;
use csv::{ReaderBuilder, Trim};

/// Direction and value series of a wind rose
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindSeries {
    pub directions: Vec<f64>,
    pub values: Vec<f64>,
}

impl WindSeries {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// Parse `direction,value` rows
///
/// Fields may be quoted and padded with spaces. Blank rows are skipped, as is
/// a first row that does not parse as numbers (a header).
pub fn parse_wind_csv(text: &str) -> Result<WindSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut series = WindSeries::default();
    let mut first = true;
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let is_first = std::mem::replace(&mut first, false);
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 2 {
            if is_first {
                tracing::debug!("Skipping wind data header: {:?}", record);
                continue;
            }
            return Err(DisplayError::Config(format!(
                "Wind data on line {} has {} fields, expected 2",
                line,
                record.len()
            )));
        }

        match record.deserialize::<(f64, f64)>(None) {
            Ok((direction, value)) => {
                series.directions.push(direction);
                series.values.push(value);
            }
            Err(_) if is_first => {
                tracing::debug!("Skipping wind data header: {:?}", record);
            }
            Err(e) => {
                return Err(DisplayError::Config(format!(
                    "Invalid wind data on line {}: {}",
                    line, e
                )))
            }
        }
    }

    Ok(series)
}

/// Generate the visualization set requested by the configuration
///
/// Wind roses need a wind series; the other diagrams ignore it.
pub fn generate_vis_set(
    config: &TranslationConfig,
    wind: Option<&WindSeries>,
) -> Result<VisualizationSet> {
    let t0 = std::time::Instant::now();
    tracing::info!("[1/2] Building {:?} diagram", config.diagram);

    let vis_set = match config.diagram {
        DiagramKind::Sunpath => {
            let sunpath = config.sunpath()?;
            let options = config.sunpath_options();
            tracing::info!(
                "  Sun path at ({}, {}), {} hours, daily: {}",
                sunpath.latitude,
                sunpath.longitude,
                options.hoys.len(),
                options.daily
            );
            tracing::info!("[2/2] Translating to visualization set");
            sunpath.to_vis_set(&options, &config.styles)?
        }
        DiagramKind::Compass => {
            let compass = config.compass()?;
            tracing::info!("[2/2] Translating to visualization set");
            compass.to_vis_set(&config.compass_options(), &config.styles)?
        }
        DiagramKind::WindRose => {
            let wind = wind.ok_or_else(|| {
                DisplayError::Config("Wind rose requires direction and value data".to_string())
            })?;
            let windrose = config.windrose(wind.directions.clone(), wind.values.clone())?;
            tracing::info!(
                "  Wind rose with {} records in {} directions",
                wind.len(),
                windrose.direction_count()
            );
            tracing::info!("[2/2] Translating to visualization set");
            windrose.to_vis_set(&config.center.z, &config.styles)?
        }
    };

    tracing::info!(
        "Generated '{}' with {} groups in {:.1}ms",
        vis_set.identifier,
        vis_set.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(vis_set)
}

/// Serialize a visualization set
pub fn render_json(vis_set: &VisualizationSet, pretty: bool) -> Result<String> {
    if pretty {
        vis_set.to_json_pretty()
    } else {
        vis_set.to_json()
    }
}
