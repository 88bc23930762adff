//! Interactive aiming state behind the map view: which launcher is selected,
//! where the last target landed, and the solution currently on display.

use mortar_core::MapPoint;
use mortar_models::{ElevationModel, FlightTimeModel, LinearElevation, ScaledFlightTime};

use crate::calculator::{FiringSolution, SolutionCalculator};
use crate::error::SolverError;
use crate::registry::LaunchPoint;

#[derive(Debug, Clone)]
pub struct AimingSession<E = LinearElevation, T = ScaledFlightTime> {
    calculator: SolutionCalculator<E, T>,
    selected: Option<String>,
    target: Option<MapPoint>,
    solution: Option<FiringSolution>,
}

impl<E: ElevationModel, T: FlightTimeModel> AimingSession<E, T> {
    /// Starts with the first registry entry selected and nothing aimed.
    pub fn new(calculator: SolutionCalculator<E, T>) -> Self {
        let selected = calculator.default_launch_point().map(|p| p.id.clone());
        Self {
            calculator,
            selected,
            target: None,
            solution: None,
        }
    }

    pub fn calculator(&self) -> &SolutionCalculator<E, T> {
        &self.calculator
    }

    pub fn selected(&self) -> Option<&LaunchPoint> {
        self.selected
            .as_deref()
            .and_then(|id| self.calculator.registry().find(id))
    }

    pub fn target(&self) -> Option<MapPoint> {
        self.target
    }

    pub fn solution(&self) -> Option<FiringSolution> {
        self.solution
    }

    /// Switch launchers. Unknown ids leave the session untouched. With a
    /// target already placed, the solution is recomputed for the new launcher.
    pub fn select(&mut self, launch_point_id: &str) -> Result<Option<FiringSolution>, SolverError> {
        if self.calculator.registry().find(launch_point_id).is_none() {
            return Err(SolverError::UnknownLaunchPoint {
                id: launch_point_id.to_owned(),
            });
        }
        self.selected = Some(launch_point_id.to_owned());
        match self.target {
            Some(target) => self.aim(target).map(Some),
            None => Ok(None),
        }
    }

    /// Place a target and solve for it. A failed solve clears the displayed solution.
    pub fn aim(&mut self, target: MapPoint) -> Result<FiringSolution, SolverError> {
        self.target = Some(target);
        let id = self.selected.as_deref().unwrap_or_default();
        let result = self.calculator.compute_solution(id, target.x, target.y);
        self.solution = result.as_ref().ok().copied();
        result
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.solution = None;
    }
}
