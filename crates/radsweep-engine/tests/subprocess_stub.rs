#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use radsweep_core::{parse_date, BaseParams, GroundReflectance, Scenario, Sensor};
use radsweep_engine::{invoke, Engine, Outcome, SixsEngine};
use tempfile::TempDir;

fn write_stub(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let script = format!("#!/bin/sh\ncat > /dev/null\n{body}");
    fs::write(&path, script).expect("write stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

fn scenario() -> Scenario {
    let base = BaseParams {
        latitude: 50.0,
        date: parse_date("2024-07-14").expect("date"),
        ground: GroundReflectance::GreenVegetation,
        sensor: Sensor::LandsatEtm,
    };
    Scenario::build(&base, 0.1)
}

const REPORT_BODY: &str = "\
printf 'apparent_reflectance: 0.128\\n'
printf 'apparent_radiance: 41.52\\n'
printf 'water_vapour_transmittance_downward: 0.912\\n'
printf 'spectrum:\\n'
printf '0.4775 40.1\\n'
printf '0.5613 38.2\\n'
printf '0.6613 33.0\\n'
";

#[test]
fn stub_engine_roundtrip() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, "sixs-ok.sh", REPORT_BODY);
    let engine = SixsEngine::new(stub);
    let output = engine.simulate(&scenario()).expect("stub run");
    assert_eq!(output.len(), 3);
    assert_eq!(output.summary.apparent_radiance, 41.52);
}

#[test]
fn nonzero_exit_carries_stderr_hint() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(
        &dir,
        "sixs-fail.sh",
        "echo 'invalid aerosol loading' >&2\nexit 3\n",
    );
    let engine = SixsEngine::new(stub);
    let err = engine.simulate(&scenario()).unwrap_err();
    assert_eq!(err.info().code, "engine-exit");
    assert!(err
        .info()
        .hint
        .as_deref()
        .unwrap_or_default()
        .contains("invalid aerosol loading"));
}

#[test]
fn hung_engine_is_killed_on_timeout() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, "sixs-hang.sh", "sleep 5\n");
    let engine = SixsEngine::new(stub).with_timeout(Duration::from_millis(200));
    let err = engine.simulate(&scenario()).unwrap_err();
    assert_eq!(err.info().code, "engine-timeout");
}

#[test]
fn missing_executable_becomes_failure_value() {
    let engine = SixsEngine::new("/nonexistent/sixs");
    let base = BaseParams {
        latitude: 50.0,
        date: parse_date("2024-07-14").expect("date"),
        ground: GroundReflectance::GreenVegetation,
        sensor: Sensor::LandsatEtm,
    };
    match invoke(&engine, &base, 0.1) {
        Outcome::Failed(failure) => {
            assert_eq!(failure.aot550, 0.1);
            assert!(!failure.reason.is_empty());
            assert!(failure.reason.contains("engine-spawn"));
        }
        Outcome::Completed(_) => panic!("expected a failure value"),
    }
}
