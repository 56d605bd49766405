use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, RadError};

/// Homogeneous Lambertian surface types accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundReflectance {
    /// Green vegetation canopy.
    GreenVegetation,
    /// Clear open water.
    ClearWater,
    /// Dry sand.
    Sand,
    /// Inland lake water.
    LakeWater,
}

impl GroundReflectance {
    /// Token used for this surface type in the engine input deck.
    pub fn deck_token(&self) -> &'static str {
        match self {
            GroundReflectance::GreenVegetation => "green_vegetation",
            GroundReflectance::ClearWater => "clear_water",
            GroundReflectance::Sand => "sand",
            GroundReflectance::LakeWater => "lake_water",
        }
    }
}

/// Sensor wavelength selections supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    /// Landsat ETM reflective band centers.
    LandsatEtm,
    /// Visible and near-infrared grid, 0.40 to 1.39 um in 0.01 um steps.
    Vnir,
}

impl Sensor {
    /// Wavelength grid (um) submitted to the engine for this sensor.
    pub fn wavelengths(&self) -> Vec<f64> {
        match self {
            Sensor::LandsatEtm => vec![0.4775, 0.5613, 0.6613, 0.8350, 1.6480, 2.2085],
            Sensor::Vnir => (0..100).map(|step| 0.40 + 0.01 * step as f64).collect(),
        }
    }
}

/// Base parameters shared by every invocation of one sweep request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseParams {
    /// Geographic latitude in degrees, within [-90, 90].
    pub latitude: f64,
    /// Calendar date used to derive the atmospheric profile.
    pub date: NaiveDate,
    /// Surface reflectance model.
    pub ground: GroundReflectance,
    /// Sensor wavelength selection.
    pub sensor: Sensor,
}

/// Scalar radiometric summary reported by one successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSummary {
    /// Apparent reflectance at the sensor.
    pub apparent_reflectance: f64,
    /// Apparent radiance at the sensor.
    pub apparent_radiance: f64,
    /// Downward water vapour transmittance.
    pub water_vapour_transmittance_downward: f64,
}

/// Full-spectrum result of one successful engine invocation.
///
/// The spectral axis is guaranteed non-empty and strictly increasing, with
/// one radiance sample per wavelength; construct through
/// [`SimulationOutput::new`] to uphold this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Spectral axis in micrometres, strictly increasing.
    pub wavelengths: Vec<f64>,
    /// Radiance samples, parallel to `wavelengths`.
    pub radiance: Vec<f64>,
    /// Scalar summary fields.
    pub summary: ScalarSummary,
}

impl SimulationOutput {
    /// Builds an output record, rejecting empty, length-mismatched or
    /// non-monotonic spectra.
    pub fn new(
        wavelengths: Vec<f64>,
        radiance: Vec<f64>,
        summary: ScalarSummary,
    ) -> Result<Self, RadError> {
        if wavelengths.is_empty() {
            return Err(RadError::Engine(ErrorInfo::new(
                "spectrum-empty",
                "engine returned a zero-length spectrum",
            )));
        }
        if wavelengths.len() != radiance.len() {
            return Err(RadError::Engine(
                ErrorInfo::new("spectrum-shape", "wavelength and radiance axes differ in length")
                    .with_context("wavelengths", wavelengths.len().to_string())
                    .with_context("radiance", radiance.len().to_string()),
            ));
        }
        if wavelengths.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(RadError::Engine(ErrorInfo::new(
                "spectrum-order",
                "spectral axis is not strictly increasing",
            )));
        }
        Ok(Self {
            wavelengths,
            radiance,
            summary,
        })
    }

    /// Number of spectral samples in this output.
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// Always false for a validly constructed output.
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

/// Record of one sweep element the engine could not complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFailure {
    /// Sweep value whose invocation failed.
    pub aot550: f64,
    /// Human readable reason derived from the underlying error.
    pub reason: String,
}

/// One completed sweep element paired with the value that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSuccess {
    /// Sweep value this output was produced for.
    pub aot550: f64,
    /// Engine output for this sweep value.
    pub output: SimulationOutput,
}

/// Aggregate outcome of one sweep request.
///
/// Both sequences preserve the caller-supplied sweep order, never the
/// completion order of concurrent invocations. Empty successes with
/// populated failures is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SweepResult {
    /// Completed elements in sweep order.
    pub successes: Vec<SweepSuccess>,
    /// Failed elements in sweep order.
    pub failures: Vec<SweepFailure>,
}

impl SweepResult {
    /// Total number of elements attempted (successes plus failures).
    pub fn attempted(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

/// One row of the flattened sweep dataset.
///
/// Field order is the stable column order of the exported artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Wavelength in micrometres.
    pub wavelength: f64,
    /// Radiance sample at this wavelength.
    pub radiance: f64,
    /// Sweep value that produced this row.
    pub sweep_value: f64,
}

/// Identity of a persisted tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    /// Filesystem path of the written artifact.
    pub path: PathBuf,
    /// Number of data rows written (excluding the header line).
    pub row_count: usize,
}
