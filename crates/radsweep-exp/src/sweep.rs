use radsweep_core::{BaseParams, ErrorInfo, RadError, SweepResult};
use radsweep_engine::{invoke, Engine, Outcome};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Scheduler configuration controlling sweep execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    /// Number of engine invocations allowed in flight; 1 runs sequentially.
    #[serde(default = "Scheduler::default_parallelism")]
    pub parallelism: usize,
}

impl Scheduler {
    const fn default_parallelism() -> usize {
        1
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            parallelism: Self::default_parallelism(),
        }
    }
}

/// Runs the engine once per sweep value and aggregates the outcomes.
///
/// Every element is attempted exactly once; a failed element is recorded
/// and never aborts the rest of the sweep. Successes and failures are
/// assembled in the caller-supplied sweep order regardless of execution
/// concurrency. An empty value list yields an empty result, and a sweep
/// where every element fails is still an `Ok` result.
pub fn run_sweep(
    engine: &dyn Engine,
    base: &BaseParams,
    sweep_values: &[f64],
    scheduler: &Scheduler,
) -> Result<SweepResult, RadError> {
    let outcomes: Vec<Outcome> = if scheduler.parallelism <= 1 {
        sweep_values
            .iter()
            .map(|&value| invoke(engine, base, value))
            .collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(scheduler.parallelism)
            .build()
            .map_err(|err| {
                RadError::Sweep(
                    ErrorInfo::new("sweep-pool", "failed to build sweep worker pool")
                        .with_context("parallelism", scheduler.parallelism.to_string())
                        .with_hint(err.to_string()),
                )
            })?;
        // Indexed parallel collect keeps the output aligned with the
        // input positions, never with completion order.
        pool.install(|| {
            sweep_values
                .par_iter()
                .map(|&value| invoke(engine, base, value))
                .collect()
        })
    };

    let mut result = SweepResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Completed(success) => result.successes.push(success),
            Outcome::Failed(failure) => result.failures.push(failure),
        }
    }
    info!(
        attempted = sweep_values.len(),
        succeeded = result.successes.len(),
        failed = result.failures.len(),
        "sweep finished"
    );
    Ok(result)
}
