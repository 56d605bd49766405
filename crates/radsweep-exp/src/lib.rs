//! Sweep orchestration, flattening and tabular export.
//!
//! This crate drives N independent engine invocations across a swept
//! aot550 parameter, aggregates their outcomes in caller-supplied order,
//! flattens the surviving spectra into one row-oriented dataset, and
//! persists that dataset as a uniquely named CSV artifact.

mod export;
mod flatten;
mod sweep;

pub use export::Exporter;
pub use flatten::flatten;
pub use sweep::{run_sweep, Scheduler};
