//! mortar-models
//!
//! Elevation and time-of-flight models used by the solver. The defaults are
//! the uncalibrated heuristics the aiming tool ships with, **not** projectile
//! physics:
//!
//!   elevation(d) = round(min + clamp(1 - d / max_range, 0, 1) * (max - min))
//!   tof(d, e)    = (d / divisor) * (1 + (e - min) / (max - min))
//!
//! With the reference band (45..85) and divisor 200 the second line reduces
//! to `(d / 200) * (1 + (e - 45) / 40)`.
//!
//! Exports:
//!   - `ElevationBand`
//!   - `ElevationModel`, `LinearElevation`
//!   - `FlightTimeModel`, `ScaledFlightTime`
//!
//! Calibrated tables can be plugged in by implementing the two traits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 45.0;
pub const DEFAULT_MAX_ELEVATION_DEG: f64 = 85.0;
/// Map units per second at the flattest elevation.
pub const DEFAULT_FLIGHT_TIME_DIVISOR: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ModelError {
    #[error("elevation band [{min}, {max}] must satisfy 0 <= min < max <= 90")]
    BandOrder { min: f64, max: f64 },
    #[error("elevation band bounds must be whole degrees, got [{min}, {max}]")]
    BandFraction { min: f64, max: f64 },
    #[error("maximum range must be positive and finite, got {0}")]
    MaxRange(f64),
    #[error("flight time divisor must be positive and finite, got {0}")]
    Divisor(f64),
}

/* ---------------------------- elevation band ---------------------------- */

/// Closed band of firing elevations [deg].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ElevationBand {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl ElevationBand {
    pub fn new(min_deg: f64, max_deg: f64) -> Result<Self, ModelError> {
        let band = Self { min_deg, max_deg };
        band.validate()?;
        Ok(band)
    }

    /// Bounds must be whole degrees so that rounded elevations never leave the band.
    pub fn validate(&self) -> Result<(), ModelError> {
        let (min, max) = (self.min_deg, self.max_deg);
        if !(min.is_finite() && max.is_finite() && 0.0 <= min && min < max && max <= 90.0) {
            return Err(ModelError::BandOrder { min, max });
        }
        if min.fract() != 0.0 || max.fract() != 0.0 {
            return Err(ModelError::BandFraction { min, max });
        }
        Ok(())
    }

    pub fn span(&self) -> f64 {
        self.max_deg - self.min_deg
    }

    pub fn contains(&self, elevation_deg: f64) -> bool {
        (self.min_deg..=self.max_deg).contains(&elevation_deg)
    }
}

impl Default for ElevationBand {
    fn default() -> Self {
        Self {
            min_deg: DEFAULT_MIN_ELEVATION_DEG,
            max_deg: DEFAULT_MAX_ELEVATION_DEG,
        }
    }
}

/* -------------------------------- traits -------------------------------- */

/// Elevation provider.
pub trait ElevationModel {
    fn band(&self) -> ElevationBand;

    /// Whole-degree elevation for a distance [map units]. Must stay inside `band()`.
    fn elevation_deg(&self, distance: f64) -> u16;
}

/// Time-of-flight provider.
pub trait FlightTimeModel {
    /// Unrounded time of flight [s] for a distance [map units] fired at
    /// `elevation_deg`.
    fn time_of_flight_s(&self, distance: f64, elevation_deg: u16) -> f64;
}

/* ---------------------------- linear elevation --------------------------- */

/// Elevation falls linearly from `band.max_deg` at zero distance to
/// `band.min_deg` at `max_range`, and stays at the minimum beyond it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearElevation {
    band: ElevationBand,
    max_range: f64,
}

impl LinearElevation {
    pub fn new(band: ElevationBand, max_range: f64) -> Result<Self, ModelError> {
        band.validate()?;
        if !(max_range.is_finite() && max_range > 0.0) {
            return Err(ModelError::MaxRange(max_range));
        }
        Ok(Self { band, max_range })
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }
}

impl ElevationModel for LinearElevation {
    fn band(&self) -> ElevationBand {
        self.band
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn elevation_deg(&self, distance: f64) -> u16 {
        let pct = (1.0 - distance / self.max_range).clamp(0.0, 1.0);
        let elevation = self.band.min_deg + self.band.span() * pct;
        elevation.round() as u16
    }
}

/* --------------------------- scaled flight time -------------------------- */

/// Flight time grows with distance and with how steep the shot is inside the band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFlightTime {
    divisor: f64,
    band: ElevationBand,
}

impl ScaledFlightTime {
    pub fn new(divisor: f64, band: ElevationBand) -> Result<Self, ModelError> {
        band.validate()?;
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(ModelError::Divisor(divisor));
        }
        Ok(Self { divisor, band })
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }
}

impl Default for ScaledFlightTime {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_FLIGHT_TIME_DIVISOR,
            band: ElevationBand::default(),
        }
    }
}

impl FlightTimeModel for ScaledFlightTime {
    fn time_of_flight_s(&self, distance: f64, elevation_deg: u16) -> f64 {
        let steepness = (f64::from(elevation_deg) - self.band.min_deg) / self.band.span();
        (distance / self.divisor) * (1.0 + steepness)
    }
}

/* -------------------------------- tests -------------------------------- */
