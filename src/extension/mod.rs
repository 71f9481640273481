//! Translators from analytical diagrams to visualization sets
//!
//! Each diagram has a free function (`compass_to_vis_set`,
//! `sunpath_to_vis_set`, `wind_rose_to_vis_set`, `hourly_plot_to_vis_set`,
//! `wind_profile_to_vis_set`) and an implementation of
//! [`ToVisualizationSet`] so callers can translate any diagram the same way.

pub mod compass;
pub mod hourlyplot;
pub mod styles;
pub mod sunpath;
pub mod windprofile;
pub mod windrose;

pub use compass::{compass_geometry, compass_to_vis_set, CompassOptions};
pub use hourlyplot::{hourly_plot_to_vis_set, HourlyPlotOptions};
pub use styles::{ElementRole, StyleOverrides};
pub use sunpath::{sunpath_to_vis_set, SunData, SunpathOptions};
pub use windprofile::{wind_profile_to_vis_set, WindProfileOptions};
pub use windrose::wind_rose_to_vis_set;

use crate::diagrams::{Compass, HourlyPlot, Sunpath, WindProfile, WindRose};
use crate::display::error::Result;
use crate::visualization::VisualizationSet;

/// Diagrams that can be drawn as a visualization set
pub trait ToVisualizationSet {
    /// Drawing options specific to the diagram
    type Options;

    fn to_vis_set(
        &self,
        options: &Self::Options,
        styles: &StyleOverrides,
    ) -> Result<VisualizationSet>;
}

impl ToVisualizationSet for Compass {
    type Options = CompassOptions;

    fn to_vis_set(
        &self,
        options: &CompassOptions,
        styles: &StyleOverrides,
    ) -> Result<VisualizationSet> {
        compass_to_vis_set(self, options, styles)
    }
}

impl ToVisualizationSet for Sunpath {
    type Options = SunpathOptions;

    fn to_vis_set(
        &self,
        options: &SunpathOptions,
        styles: &StyleOverrides,
    ) -> Result<VisualizationSet> {
        sunpath_to_vis_set(self, options, styles)
    }
}

impl ToVisualizationSet for WindRose {
    /// Elevation of the rose
    type Options = f64;

    fn to_vis_set(&self, z: &f64, styles: &StyleOverrides) -> Result<VisualizationSet> {
        wind_rose_to_vis_set(self, *z, styles)
    }
}

impl ToVisualizationSet for HourlyPlot {
    type Options = HourlyPlotOptions;

    fn to_vis_set(
        &self,
        options: &HourlyPlotOptions,
        styles: &StyleOverrides,
    ) -> Result<VisualizationSet> {
        hourly_plot_to_vis_set(self, options, styles)
    }
}

impl ToVisualizationSet for WindProfile {
    type Options = WindProfileOptions;

    fn to_vis_set(
        &self,
        options: &WindProfileOptions,
        styles: &StyleOverrides,
    ) -> Result<VisualizationSet> {
        wind_profile_to_vis_set(self, options, styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::Date;
    use crate::geometry::Point2D;

    fn translate<T: ToVisualizationSet>(diagram: &T, options: &T::Options) -> VisualizationSet {
        diagram.to_vis_set(options, &StyleOverrides::new()).unwrap()
    }

    #[test]
    fn test_trait_matches_free_functions() {
        let compass = Compass::new(10.0, Point2D::default(), 15.0).unwrap();
        let options = CompassOptions::default();
        assert_eq!(
            translate(&compass, &options),
            compass_to_vis_set(&compass, &options, &StyleOverrides::new()).unwrap()
        );

        let rose = WindRose::new(vec![0.0, 90.0, 180.0], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(translate(&rose, &2.0).identifier, "Wind_Rose");

        let sunpath = Sunpath::new(0.0, 0.0, 0.0).unwrap();
        let vis_set = translate(&sunpath, &SunpathOptions::default());
        assert_eq!(vis_set.identifier, "Sunpath_0_0");
        assert_eq!(vis_set.group_names(), vec!["Compass", "Analemmas", "Daily_Arcs"]);

        let plot = HourlyPlot::new(vec![1.0; 48], Date::new(3, 1).unwrap(), "Humidity", "%")
            .unwrap();
        let options = HourlyPlotOptions::default();
        assert_eq!(
            translate(&plot, &options),
            hourly_plot_to_vis_set(&plot, &options, &StyleOverrides::new()).unwrap()
        );

        let profile = WindProfile::default();
        let options = WindProfileOptions {
            meteorological_wind_speed: 8.0,
            ..Default::default()
        };
        assert_eq!(translate(&profile, &options).identifier, "WindProfile_8");
    }
}
