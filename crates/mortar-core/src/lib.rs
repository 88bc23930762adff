//! Core map-plane math for the mortar workspace
//!
//! Includes:
//! - Map points & offsets
//! - Bearing (azimuth) conversion out of the y-down pixel frame
//! - Compass octant names
//! - Rounding helpers for solution output
//! - Display <-> native map scaling and the trajectory overlay

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// -------------------------
/// Points
/// -------------------------

/// A position in native map-pixel space (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other` [map units]
    pub fn offset_to(self, other: MapPoint) -> Vector2<f64> {
        Vector2::new(other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance [map units]
    pub fn distance_to(self, other: MapPoint) -> f64 {
        self.offset_to(other).norm()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for MapPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// -------------------------
/// Bearings
/// -------------------------

/// Unrounded compass bearing [deg] from `from` to `to`.
///
/// Pixel space is left-handed with y growing downward, so the raw `atan2`
/// angle is remapped in three order-dependent steps:
///   1. rebase: subtract 90°
///   2. normalize: add 360° if negative
///   3. invert: `360 - angle` (clockwise)
///
/// The result lies in `(0, 360]`. A zero offset has no direction and returns `0`.
pub fn bearing_deg(from: MapPoint, to: MapPoint) -> f64 {
    let d = from.offset_to(to);
    if d == Vector2::zeros() {
        return 0.0;
    }

    let mut angle = d.y.atan2(d.x).to_degrees();
    angle -= 90.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    360.0 - angle
}

/// Whole-degree azimuth in `[0, 360)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn azimuth_deg(from: MapPoint, to: MapPoint) -> u16 {
    // 360 (straight down) and anything rounding up to it lands on 0
    bearing_deg(from, to).round().rem_euclid(360.0) as u16
}

/// -------------------------
/// Compass
/// -------------------------

/// The eight principal compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthEast => "NE",
            CompassPoint::East => "E",
            CompassPoint::SouthEast => "SE",
            CompassPoint::South => "S",
            CompassPoint::SouthWest => "SW",
            CompassPoint::West => "W",
            CompassPoint::NorthWest => "NW",
        }
    }

    /// Nearest octant: `round(degrees / 45) mod 8`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        let index = (degrees / 45.0).round().rem_euclid(8.0) as usize;
        // rem_euclid can return exactly 8.0 for tiny negative inputs
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compass octant for a bearing in degrees.
pub fn compass_direction(degrees: f64) -> CompassPoint {
    CompassPoint::from_degrees(degrees)
}

/// -------------------------
/// Rounding
/// -------------------------

/// Round to one decimal place using the exact binary value of `value`.
///
/// `0.95` is stored as `0.9499…` and therefore rounds to `0.9`. Exact ties
/// (`x.25`, `x.75`) round away from zero.
#[allow(clippy::float_cmp)]
pub fn round_to_tenths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let magnitude = value.abs();
    let quarters = magnitude * 4.0;
    let rounded = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        (magnitude * 10.0).ceil() / 10.0
    } else {
        format!("{magnitude:.1}").parse().unwrap_or(magnitude)
    };
    rounded.copysign(value)
}

/// -------------------------
/// Display scaling
/// -------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScaleError {
    #[error("rendered width must be positive and finite, got {0}")]
    RenderedWidth(f64),
    #[error("native width must be positive and finite, got {0}")]
    NativeWidth(f64),
}

/// Ratio between the rendered map and its native pixel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapScale {
    factor: f64,
}

impl MapScale {
    pub const IDENTITY: MapScale = MapScale { factor: 1.0 };

    /// `rendered_width / native_width`, both in pixels.
    pub fn from_widths(rendered_width: f64, native_width: f64) -> Result<Self, ScaleError> {
        if !(rendered_width.is_finite() && rendered_width > 0.0) {
            return Err(ScaleError::RenderedWidth(rendered_width));
        }
        if !(native_width.is_finite() && native_width > 0.0) {
            return Err(ScaleError::NativeWidth(native_width));
        }
        Ok(Self { factor: rendered_width / native_width })
    }

    pub fn factor(self) -> f64 {
        self.factor
    }

    /// Pointer position in client coordinates -> native map pixels.
    ///
    /// `origin_left` / `origin_top` are the client coordinates of the map's
    /// top-left corner.
    pub fn to_map(self, client_x: f64, client_y: f64, origin_left: f64, origin_top: f64) -> MapPoint {
        MapPoint::new(
            (client_x - origin_left) / self.factor,
            (client_y - origin_top) / self.factor,
        )
    }

    /// Native map pixels -> position inside the rendered map.
    pub fn to_display(self, point: MapPoint) -> MapPoint {
        MapPoint::new(point.x * self.factor, point.y * self.factor)
    }
}

impl Default for MapScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Launcher -> target line in display space, for drawing the aiming arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryOverlay {
    pub start: MapPoint,
    pub end: MapPoint,
    /// Line length [display px]
    pub length: f64,
    /// Screen angle [deg], `atan2(dy, dx)` with y down; not a compass bearing
    pub angle_deg: f64,
}

impl TrajectoryOverlay {
    pub fn new(launch: MapPoint, target: MapPoint, scale: MapScale) -> Self {
        let start = scale.to_display(launch);
        let end = scale.to_display(target);
        let d = start.offset_to(end);
        Self {
            start,
            end,
            length: d.norm(),
            angle_deg: d.y.atan2(d.x).to_degrees(),
        }
    }
}

/* -------------------------------- tests -------------------------------- */
