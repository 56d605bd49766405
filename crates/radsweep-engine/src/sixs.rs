//! Subprocess backend for the compiled radiative-transfer executable.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use radsweep_core::{ErrorInfo, RadError, Scenario, SimulationOutput};
use tracing::debug;

use crate::deck::render_deck;
use crate::parser::parse_report;
use crate::Engine;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Subprocess backend around the engine executable.
///
/// Every call spawns a fresh process fed through stdin, so concurrent
/// invocations never share a session. A wall clock timeout bounds each run;
/// on expiry the process is killed and the element reports a failure
/// instead of blocking the sweep.
#[derive(Debug, Clone)]
pub struct SixsEngine {
    executable: PathBuf,
    timeout: Duration,
}

impl SixsEngine {
    /// Creates a backend for the executable at the given path.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-invocation wall clock timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn execute(&self, deck: &str) -> Result<String, RadError> {
        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                RadError::Engine(
                    ErrorInfo::new("engine-spawn", "failed to spawn engine executable")
                        .with_context("executable", self.executable.display().to_string())
                        .with_hint(err.to_string()),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(deck.as_bytes()).map_err(|err| {
                let _ = child.kill();
                let _ = child.wait();
                RadError::Engine(
                    ErrorInfo::new("engine-stdin", "failed to submit input deck to the engine")
                        .with_hint(err.to_string()),
                )
            })?;
        }

        // Both pipes are drained off-thread so a chatty engine cannot
        // deadlock against a full pipe buffer while we wait on it.
        let stdout = child.stdout.take().ok_or_else(|| {
            RadError::Engine(ErrorInfo::new(
                "engine-stdout",
                "engine stdout was not captured",
            ))
        })?;
        let stderr = child.stderr.take();
        let stdout_reader = drain(stdout);
        let stderr_reader = stderr.map(drain);

        let status = self.wait_with_timeout(&mut child)?;
        let report = join_drain(stdout_reader, "engine-stdout")?;
        let diagnostics = stderr_reader
            .map(|reader| join_drain(reader, "engine-stderr"))
            .transpose()?
            .unwrap_or_default();

        if !status.success() {
            let mut info = ErrorInfo::new("engine-exit", "engine exited with a failure status")
                .with_context("status", status.to_string());
            let diagnostics = diagnostics.trim();
            if !diagnostics.is_empty() {
                info = info.with_hint(diagnostics.to_string());
            }
            return Err(RadError::Engine(info));
        }
        Ok(report)
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus, RadError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RadError::Engine(
                            ErrorInfo::new(
                                "engine-timeout",
                                "engine run exceeded the configured timeout and was killed",
                            )
                            .with_context("timeout_ms", self.timeout.as_millis().to_string()),
                        ));
                    }
                    thread::sleep(WAIT_POLL);
                }
                Err(err) => {
                    return Err(RadError::Engine(
                        ErrorInfo::new("engine-wait", "failed waiting for the engine process")
                            .with_hint(err.to_string()),
                    ))
                }
            }
        }
    }
}

impl Engine for SixsEngine {
    fn simulate(&self, scenario: &Scenario) -> Result<SimulationOutput, RadError> {
        let deck = render_deck(scenario);
        debug!(
            executable = %self.executable.display(),
            atmosphere = scenario.atmosphere().deck_token(),
            aot550 = ?scenario.aot550,
            "running engine"
        );
        let report = self.execute(&deck)?;
        parse_report(&report)
    }
}

fn drain(mut pipe: impl Read + Send + 'static) -> JoinHandle<std::io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = String::new();
        pipe.read_to_string(&mut buffer)?;
        Ok(buffer)
    })
}

fn join_drain(handle: JoinHandle<std::io::Result<String>>, code: &str) -> Result<String, RadError> {
    handle
        .join()
        .map_err(|_| {
            RadError::Engine(ErrorInfo::new(code, "engine output drain thread panicked"))
        })?
        .map_err(|err| {
            RadError::Engine(
                ErrorInfo::new(code, "failed reading engine output").with_hint(err.to_string()),
            )
        })
}
