//! Plain-text rendering of a solution, laid out like the result panel.

use std::fmt;

use mortar_core::MapPoint;

use crate::calculator::FiringSolution;
use crate::registry::LaunchPoint;

/// Seconds with at least one decimal digit: `2.3`, `5.0`, `0.0`.
pub fn format_seconds(seconds: f64) -> String {
    let mut buf = ryu::Buffer::new();
    buf.format(seconds).to_owned()
}

pub struct SolutionReport<'a> {
    solution: &'a FiringSolution,
    launch: Option<&'a LaunchPoint>,
    target: Option<MapPoint>,
}

impl<'a> SolutionReport<'a> {
    pub fn new(solution: &'a FiringSolution) -> Self {
        Self {
            solution,
            launch: None,
            target: None,
        }
    }

    #[must_use]
    pub fn with_launch(mut self, launch: &'a LaunchPoint) -> Self {
        self.launch = Some(launch);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: MapPoint) -> Self {
        self.target = Some(target);
        self
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.solution;
        if let Some(launch) = self.launch {
            writeln!(f, "Launch point {} ({}) at ({}, {})", launch.name, launch.id, launch.x, launch.y)?;
        }
        if let Some(target) = self.target {
            writeln!(f, "Target       ({}, {})", target.x, target.y)?;
        }
        writeln!(f, "Azimuth      {}° ({})", s.azimuth_deg, s.compass())?;
        writeln!(f, "Elevation    {}°", s.elevation_deg)?;
        writeln!(f, "Distance     {:.0} units", s.distance)?;
        write!(f, "Flight time  {} sec", format_seconds(s.time_of_flight_s))
    }
}
