//! Adapter around the external radiative-transfer engine.
//!
//! The engine is a black box behind the [`Engine`] trait; [`SixsEngine`] is
//! the subprocess backend used in production. [`invoke`] is the failure
//! boundary: every error raised while attempting a sweep element is caught
//! there and converted into a [`SweepFailure`] value, so failures flow as
//! data through the rest of the pipeline.

mod deck;
mod parser;
mod sixs;

pub use deck::render_deck;
pub use parser::parse_report;
pub use sixs::SixsEngine;

use radsweep_core::{BaseParams, RadError, Scenario, SimulationOutput, SweepFailure, SweepSuccess};

/// Seam for the external simulation engine.
///
/// Implementations must be safe to call concurrently: each call owns an
/// isolated engine session, with no mutable state shared between two
/// in-flight invocations.
pub trait Engine: Send + Sync {
    /// Runs one scenario to completion, returning the normalized output.
    fn simulate(&self, scenario: &Scenario) -> Result<SimulationOutput, RadError>;
}

/// Outcome of one sweep element attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The engine produced a full output record.
    Completed(SweepSuccess),
    /// The engine could not complete this element.
    Failed(SweepFailure),
}

/// Attempts one sweep element.
///
/// Builds the scenario for `sweep_value`, invokes the engine once, and
/// converts any error into a [`SweepFailure`] carrying a human readable
/// reason. No error escapes this boundary.
pub fn invoke(engine: &dyn Engine, base: &BaseParams, sweep_value: f64) -> Outcome {
    let scenario = Scenario::build(base, sweep_value);
    match engine.simulate(&scenario) {
        Ok(output) => Outcome::Completed(SweepSuccess {
            aot550: sweep_value,
            output,
        }),
        Err(err) => {
            tracing::warn!(aot550 = sweep_value, error = %err, "sweep element failed");
            Outcome::Failed(SweepFailure {
                aot550: sweep_value,
                reason: err.to_string(),
            })
        }
    }
}
