#![deny(missing_docs)]
#![doc = "Shared data model and error surface for the radsweep workspace."]

pub mod errors;
pub mod scenario;
mod types;

pub use errors::{ErrorInfo, RadError};
pub use scenario::{parse_date, validate_latitude, AtmosphereProfile, Scenario};
pub use types::{
    BaseParams, ExportArtifact, FlatRow, GroundReflectance, ScalarSummary, Sensor,
    SimulationOutput, SweepFailure, SweepResult, SweepSuccess,
};
