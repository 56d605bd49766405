//! Shared application state and request/response types for the radsweep API.

use std::sync::Arc;

use radsweep_core::{FlatRow, GroundReflectance, Sensor, SweepFailure};
use radsweep_engine::Engine;
use radsweep_exp::{Exporter, Scheduler};
use serde::{Deserialize, Serialize};

/// Shared application state for the radsweep server.
///
/// The engine backend is shared behind an `Arc`; every invocation opens its
/// own isolated session, so handlers never coordinate around it.
#[derive(Clone)]
pub struct AppState {
    /// Engine backend used for all invocations.
    pub engine: Arc<dyn Engine>,
    /// CSV exporter for sweep artifacts.
    pub exporter: Exporter,
    /// Scheduler applied to sweep requests.
    pub scheduler: Scheduler,
}

fn default_ground() -> GroundReflectance {
    GroundReflectance::GreenVegetation
}

/// Request payload for `POST /run-model` (single scenario).
#[derive(Debug, Clone, Deserialize)]
pub struct RunModelRequest {
    /// Geographic latitude in degrees.
    pub latitude: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Optional aerosol optical thickness override at 550 nm.
    #[serde(default)]
    pub aot550: Option<f64>,
    /// Sensor wavelength selection.
    pub sensor: Sensor,
    /// Surface reflectance model; green vegetation when omitted.
    #[serde(default = "default_ground")]
    pub ground: GroundReflectance,
}

/// Response payload for a successful `POST /run-model`.
#[derive(Debug, Serialize)]
pub struct RunModelResponse {
    /// Spectral axis in micrometres.
    pub wavelengths: Vec<f64>,
    /// Radiance samples, parallel to `wavelengths`.
    pub radiance: Vec<f64>,
    /// Apparent reflectance at the sensor.
    pub apparent_reflectance: f64,
    /// Apparent radiance at the sensor.
    pub apparent_radiance: f64,
    /// Downward water vapour transmittance.
    pub water_vapour_transmittance_downward: f64,
}

/// Request payload for `POST /run-sweep`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSweepRequest {
    /// Geographic latitude in degrees.
    pub latitude: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Aerosol optical thickness values to sweep, in output order.
    pub aot_values: Vec<f64>,
    /// Sensor wavelength selection.
    pub sensor: Sensor,
    /// Surface reflectance model; green vegetation when omitted.
    #[serde(default = "default_ground")]
    pub ground: GroundReflectance,
}

/// Response payload for `POST /run-sweep`.
///
/// The flattened rows and per-element failures are always present; when the
/// CSV export itself failed, `csv_file` is null and `export_error` carries
/// the reason while the in-memory dataset is still returned.
#[derive(Debug, Serialize)]
pub struct RunSweepResponse {
    /// Flattened dataset, grouped by sweep value in sweep order.
    pub data: Vec<FlatRow>,
    /// Path of the persisted CSV artifact, if the export succeeded.
    pub csv_file: Option<String>,
    /// Sweep elements the engine could not complete.
    pub failures: Vec<SweepFailure>,
    /// Reason the CSV export failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_error: Option<String>,
}

/// Error payload returned for rejected or failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human readable error message.
    pub error: String,
}
