//! Analytical climate diagrams
//!
//! These are the objects translated into visualization sets:
//! - `dt.rs`: dates and hours of the year
//! - `sunpath.rs`: solar positions, daily arcs and analemmas
//! - `compass.rs`: compass circles, ticks and labels
//! - `windrose.rs`: direction binning, frequency rings and the petal mesh
//! - `hourlyplot.rs`: day by hour grid of hourly values with its axes
//! - `windprofile.rs`: wind speed over height, arrows and axes

pub mod compass;
pub mod dt;
pub mod hourlyplot;
pub mod sunpath;
pub mod windprofile;
pub mod windrose;

pub use compass::{Circle2D, Compass};
pub use dt::{Date, DateTime};
pub use hourlyplot::HourlyPlot;
pub use sunpath::{Projection, Sun, Sunpath};
pub use windprofile::{ProfileLayout, Terrain, WindProfile};
pub use windrose::WindRose;
