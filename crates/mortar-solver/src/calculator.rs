//! Coordinate-to-solution transform.
//!
//! Given a launch point id and a target in native map pixels:
//!   1. resolve the id in the injected registry (the only failure)
//!   2. azimuth from the bearing chain in `mortar_core`
//!   3. distance as the Euclidean norm of the offset
//!   4. elevation from the elevation model (unrounded distance)
//!   5. time of flight from the rounded elevation and unrounded distance
//!
//! Output rounding: whole-degree angles, whole map units, tenths of a second.

use mortar_core::{azimuth_deg, compass_direction, round_to_tenths, CompassPoint, MapPoint};
use mortar_models::{ElevationModel, FlightTimeModel, LinearElevation, ScaledFlightTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::error::{ConfigError, SolverError};
use crate::registry::{LaunchPoint, LaunchPointRegistry};

/// Aiming output for one target. Recomputed from scratch for every target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    /// Clockwise bearing [deg], `0..360`
    pub azimuth_deg: u16,
    /// Firing elevation [deg], inside the configured band
    pub elevation_deg: u16,
    /// Whole map units
    pub distance: f64,
    /// Seconds, one decimal
    pub time_of_flight_s: f64,
}

impl FiringSolution {
    pub fn compass(&self) -> CompassPoint {
        compass_direction(f64::from(self.azimuth_deg))
    }
}

/// Firing-solution calculator over an immutable launch-point table.
///
/// The default model pair is the linear elevation / scaled flight-time
/// heuristic; `with_models` accepts any other implementation.
#[derive(Debug, Clone)]
pub struct SolutionCalculator<E = LinearElevation, T = ScaledFlightTime> {
    registry: LaunchPointRegistry,
    elevation: E,
    flight_time: T,
}

impl SolutionCalculator {
    pub fn new(config: CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let elevation = LinearElevation::new(config.elevation, config.max_range())?;
        let flight_time = ScaledFlightTime::new(config.flight_time_divisor, config.elevation)?;
        Ok(Self::with_models(config.launch_points, elevation, flight_time))
    }

    /// Maximum range of the linear elevation model [map units].
    pub fn max_range(&self) -> f64 {
        self.elevation.max_range()
    }
}

impl<E: ElevationModel, T: FlightTimeModel> SolutionCalculator<E, T> {
    pub fn with_models(registry: LaunchPointRegistry, elevation: E, flight_time: T) -> Self {
        Self {
            registry,
            elevation,
            flight_time,
        }
    }

    pub fn registry(&self) -> &LaunchPointRegistry {
        &self.registry
    }

    pub fn default_launch_point(&self) -> Option<&LaunchPoint> {
        self.registry.first()
    }

    pub fn compute_solution(
        &self,
        launch_point_id: &str,
        target_x: f64,
        target_y: f64,
    ) -> Result<FiringSolution, SolverError> {
        let Some(launch) = self.registry.find(launch_point_id) else {
            warn!(launch_point = launch_point_id, "unknown launch point");
            return Err(SolverError::UnknownLaunchPoint {
                id: launch_point_id.to_owned(),
            });
        };
        Ok(self.solve_from(launch.position(), MapPoint::new(target_x, target_y)))
    }

    /// Solution between two already-resolved positions. Total over finite inputs.
    pub fn solve_from(&self, launch: MapPoint, target: MapPoint) -> FiringSolution {
        let azimuth = azimuth_deg(launch, target);
        let distance = launch.distance_to(target);
        let elevation = self.elevation.elevation_deg(distance);
        let time_of_flight = self.flight_time.time_of_flight_s(distance, elevation);

        let solution = FiringSolution {
            azimuth_deg: azimuth,
            elevation_deg: elevation,
            distance: distance.round(),
            time_of_flight_s: round_to_tenths(time_of_flight),
        };
        debug!(
            target_x = target.x,
            target_y = target.y,
            azimuth = solution.azimuth_deg,
            elevation = solution.elevation_deg,
            distance = solution.distance,
            tof = solution.time_of_flight_s,
            "computed firing solution"
        );
        solution
    }
}
