// crates/mortar-ffi-wasm/src/lib.rs
//
// WASM bindings: one-shot solves, the configurable calculator, and the
// interactive session used by the map view.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use mortar_core::{compass_direction, MapPoint, MapScale, ScaleError, TrajectoryOverlay};
use mortar_solver::{
    AimingSession, CalculatorConfig, FiringSolution, LaunchPoint, SolutionCalculator,
};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsLaunchPoint {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}
impl From<&LaunchPoint> for JsLaunchPoint {
    fn from(p: &LaunchPoint) -> Self {
        JsLaunchPoint {
            id: p.id.clone(),
            name: p.name.clone(),
            x: p.x,
            y: p.y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSolveInput {
    pub launch_point_id: String,
    pub target_x: f64,
    pub target_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsFiringSolution {
    pub azimuth_deg: u16,
    /// "N" | "NE" | ... | "NW"
    pub compass: String,
    pub elevation_deg: u16,
    pub distance: f64,
    pub time_of_flight_s: f64,
}
impl From<FiringSolution> for JsFiringSolution {
    fn from(s: FiringSolution) -> Self {
        JsFiringSolution {
            azimuth_deg: s.azimuth_deg,
            compass: s.compass().label().to_owned(),
            elevation_deg: s.elevation_deg,
            distance: s.distance,
            time_of_flight_s: s.time_of_flight_s,
        }
    }
}

/// A pointer event against the rendered map element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsMapClick {
    pub client_x: f64,
    pub client_y: f64,
    /// `getBoundingClientRect()` of the map element
    pub rect_left: f64,
    pub rect_top: f64,
    pub rect_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsOverlay {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub length: f64,
    pub angle_deg: f64,
}
impl From<TrajectoryOverlay> for JsOverlay {
    fn from(o: TrajectoryOverlay) -> Self {
        JsOverlay {
            start_x: o.start.x,
            start_y: o.start.y,
            end_x: o.end.x,
            end_y: o.end.y,
            length: o.length,
            angle_deg: o.angle_deg,
        }
    }
}

/* ------------------------------- helpers -------------------------------- */

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn finite_target(x: f64, y: f64) -> Result<MapPoint, JsValue> {
    let p = MapPoint::new(x, y);
    if p.is_finite() {
        Ok(p)
    } else {
        Err(JsValue::from_str("target coordinates must be finite numbers"))
    }
}

fn config_from_js(config: JsValue) -> Result<CalculatorConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        Ok(CalculatorConfig::default())
    } else {
        Ok(swb::from_value(config)?)
    }
}

/// Pointer position -> native map pixels for a map rendered `rect_width` wide.
pub fn click_to_map(click: &JsMapClick, native_width: f64) -> Result<MapPoint, ScaleError> {
    let scale = MapScale::from_widths(click.rect_width, native_width)?;
    Ok(scale.to_map(click.client_x, click.client_y, click.rect_left, click.rect_top))
}

fn solution_to_js(solution: Option<FiringSolution>) -> Result<JsValue, JsValue> {
    match solution {
        Some(s) => swb::to_value(&JsFiringSolution::from(s)).map_err(|e| e.into()),
        None => Ok(JsValue::NULL),
    }
}

fn launch_points_to_js(calc: &SolutionCalculator) -> Result<JsValue, JsValue> {
    let points: Vec<JsLaunchPoint> = calc.registry().iter().map(JsLaunchPoint::from).collect();
    swb::to_value(&points).map_err(|e| e.into())
}

/* ------------------------------ one-shot API ----------------------------- */

/// The built-in configuration (reference map, 45..85 band, divisor 200).
#[wasm_bindgen]
pub fn default_config_js() -> Result<JsValue, JsValue> {
    swb::to_value(&CalculatorConfig::default()).map_err(|e| e.into())
}

#[wasm_bindgen]
pub fn launch_points_js() -> Result<JsValue, JsValue> {
    let calc = SolutionCalculator::new(CalculatorConfig::default()).map_err(js_err)?;
    launch_points_to_js(&calc)
}

/// Solve against the reference configuration. Rejects unknown launch points.
#[wasm_bindgen]
pub fn compute_solution_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsSolveInput = swb::from_value(input)?;
    let target = finite_target(inp.target_x, inp.target_y)?;

    let calc = SolutionCalculator::new(CalculatorConfig::default()).map_err(js_err)?;
    let solution = calc
        .compute_solution(&inp.launch_point_id, target.x, target.y)
        .map_err(js_err)?;
    solution_to_js(Some(solution))
}

#[wasm_bindgen]
pub fn compass_direction_js(degrees: f64) -> String {
    compass_direction(degrees).label().to_owned()
}

/* ------------------------------ calculator ------------------------------- */

#[wasm_bindgen]
pub struct WasmCalculator {
    inner: SolutionCalculator,
}

#[wasm_bindgen]
impl WasmCalculator {
    /// `config` may be omitted; partial objects fall back to defaults per field.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmCalculator, JsValue> {
        let config = config_from_js(config)?;
        let inner = SolutionCalculator::new(config).map_err(js_err)?;
        Ok(WasmCalculator { inner })
    }

    pub fn launch_points(&self) -> Result<JsValue, JsValue> {
        launch_points_to_js(&self.inner)
    }

    pub fn compute(&self, launch_point_id: &str, target_x: f64, target_y: f64) -> Result<JsValue, JsValue> {
        let target = finite_target(target_x, target_y)?;
        let solution = self
            .inner
            .compute_solution(launch_point_id, target.x, target.y)
            .map_err(js_err)?;
        solution_to_js(Some(solution))
    }
}

/* -------------------------------- session -------------------------------- */

#[wasm_bindgen]
pub struct WasmSession {
    inner: AimingSession,
    map_width: f64,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmSession, JsValue> {
        let config = config_from_js(config)?;
        let map_width = config.map.width;
        let calc = SolutionCalculator::new(config).map_err(js_err)?;
        Ok(WasmSession {
            inner: AimingSession::new(calc),
            map_width,
        })
    }

    pub fn launch_points(&self) -> Result<JsValue, JsValue> {
        launch_points_to_js(self.inner.calculator())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.inner.selected().map(|p| p.id.clone())
    }

    /// Returns the recomputed solution, or `null` when no target is placed yet.
    pub fn select(&mut self, launch_point_id: &str) -> Result<JsValue, JsValue> {
        let solution = self.inner.select(launch_point_id).map_err(js_err)?;
        solution_to_js(solution)
    }

    /// Aim at native map pixels.
    pub fn aim(&mut self, target_x: f64, target_y: f64) -> Result<JsValue, JsValue> {
        let target = finite_target(target_x, target_y)?;
        let solution = self.inner.aim(target).map_err(js_err)?;
        solution_to_js(Some(solution))
    }

    /// Aim from a pointer event on the rendered map (`JsMapClick`).
    pub fn aim_click(&mut self, click: JsValue) -> Result<JsValue, JsValue> {
        let click: JsMapClick = swb::from_value(click)?;
        let target = click_to_map(&click, self.map_width).map_err(js_err)?;
        self.aim(target.x, target.y)
    }

    /// Currently displayed solution, or `null`.
    pub fn solution(&self) -> Result<JsValue, JsValue> {
        solution_to_js(self.inner.solution())
    }

    /// Launcher -> target line for a map rendered `rendered_width` px wide,
    /// or `null` without a target.
    pub fn overlay(&self, rendered_width: f64) -> Result<JsValue, JsValue> {
        let (Some(launch), Some(target)) = (self.inner.selected(), self.inner.target()) else {
            return Ok(JsValue::NULL);
        };
        let scale = MapScale::from_widths(rendered_width, self.map_width).map_err(js_err)?;
        let overlay = TrajectoryOverlay::new(launch.position(), target, scale);
        swb::to_value(&JsOverlay::from(overlay)).map_err(|e| e.into())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

/* -------------------------------- tests -------------------------------- */
