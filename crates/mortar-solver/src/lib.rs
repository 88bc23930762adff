//! mortar-solver
//!
//! Turns a launch point id and a clicked target (native map pixels) into a
//! firing solution: azimuth, elevation, distance and time of flight.
//!
//! - `SolutionCalculator` owns an immutable `LaunchPointRegistry` and the
//!   elevation / flight-time models built from a `CalculatorConfig`.
//! - `AimingSession` keeps the selection and last solution for interactive use.
//! - `SolutionReport` renders a solution as text.
//!
//! ```
//! use mortar_solver::{CalculatorConfig, SolutionCalculator};
//!
//! let calc = SolutionCalculator::new(CalculatorConfig::default())?;
//! let s = calc.compute_solution("b2", 666.0, 64.0)?;
//! assert_eq!((s.azimuth_deg, s.elevation_deg, s.distance), (90, 77, 189.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;
pub mod session;

pub use calculator::{FiringSolution, SolutionCalculator};
pub use config::{CalculatorConfig, MapDimensions, REFERENCE_MAP_HEIGHT, REFERENCE_MAP_WIDTH};
pub use error::{ConfigError, SolverError};
pub use registry::{LaunchPoint, LaunchPointRegistry};
pub use report::{format_seconds, SolutionReport};
pub use session::AimingSession;

pub use mortar_core::{compass_direction, CompassPoint, MapPoint};
pub use mortar_models::{ElevationBand, ElevationModel, FlightTimeModel};
