//! Launch points and the immutable table they are looked up in.

use std::collections::HashSet;

use mortar_core::MapPoint;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A fixed, named launcher position in native map pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPoint {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl LaunchPoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> MapPoint {
        MapPoint::new(self.x, self.y)
    }
}

/// Launch points in display order. Lookups are exact, case-sensitive id matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchPointRegistry {
    points: Vec<LaunchPoint>,
}

impl LaunchPointRegistry {
    pub fn new(points: Vec<LaunchPoint>) -> Result<Self, ConfigError> {
        let registry = Self { points };
        registry.validate()?;
        Ok(registry)
    }

    /// The three positions marked on the reference map.
    pub fn reference() -> Self {
        Self {
            points: vec![
                LaunchPoint::new("b2", "B2", 477.0, 64.0),
                LaunchPoint::new("b3", "B3", 666.0, 64.0),
                LaunchPoint::new("d3", "D3", 580.0, 316.0),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        let mut seen = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            if point.id.is_empty() {
                return Err(ConfigError::EmptyId);
            }
            if !point.position().is_finite() {
                return Err(ConfigError::NonFinitePosition(point.id.clone()));
            }
            if !seen.insert(point.id.as_str()) {
                return Err(ConfigError::DuplicateId(point.id.clone()));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&LaunchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Default selection for interactive front-ends.
    pub fn first(&self) -> Option<&LaunchPoint> {
        self.points.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for LaunchPointRegistry {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'a> IntoIterator for &'a LaunchPointRegistry {
    type Item = &'a LaunchPoint;
    type IntoIter = std::slice::Iter<'a, LaunchPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
