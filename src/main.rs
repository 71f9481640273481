//! Ladybug Display - command line entry point
//!
//! Translates a sun path, wind rose or compass into a visualization set and
//! prints it as JSON on stdout. Logs go to stderr (filter with RUST_LOG).
//!
//! Every `--name value` argument becomes a property from display.json, for
//! example:
//!
//! ```text
//! ladybug_display --diagram sunpath --latitude 42.36 --longitude -71.06 \
//!     --time_zone -5 --daily true --month 6 --day 21
//! ladybug_display --diagram windrose --windrose-data wind.csv --city Boston
//! ```

use anyhow::Context;
use ladybug_display::pipeline::{self, WindSeries};
use ladybug_display::display::PropertyReader;
use ladybug_display::TranslationConfig;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Arguments handled by the binary rather than the property registry
#[derive(Debug, Default)]
struct CliArgs {
    properties: HashMap<String, String>,
    windrose_data: Option<String>,
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Ladybug Display v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    let config = TranslationConfig::from_properties(&PropertyReader::new(cli.properties))
        .context("Invalid configuration")?;

    let wind = match &cli.windrose_data {
        Some(path) => Some(read_wind_data(path)?),
        None => None,
    };

    let vis_set = pipeline::generate_vis_set(&config, wind.as_ref())
        .context("Failed to generate visualization set")?;
    let json = pipeline::render_json(&vis_set, !cli.compact)?;
    println!("{}", json);

    Ok(())
}

/// Parse `--name value` pairs
///
/// Unknown names are passed on as properties; display.json decides whether
/// they mean anything. A trailing name without a value is ignored.
fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--compact" => {
                cli.compact = true;
                i += 1;
            }
            "--windrose-data" if i + 1 < args.len() => {
                cli.windrose_data = Some(args[i + 1].clone());
                i += 2;
            }
            arg if arg.starts_with("--") && i + 1 < args.len() => {
                cli.properties
                    .insert(arg.trim_start_matches("--").to_string(), args[i + 1].clone());
                i += 2;
            }
            other => {
                tracing::warn!("Ignoring argument '{}'", other);
                i += 1;
            }
        }
    }
    cli
}

fn read_wind_data(path: &str) -> anyhow::Result<WindSeries> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read wind data from {}", path))?;
    let series = pipeline::parse_wind_csv(&text)
        .with_context(|| format!("Failed to parse wind data from {}", path))?;
    tracing::info!("Loaded {} wind records from {}", series.len(), path);
    Ok(series)
}
