use radsweep_core::{ErrorInfo, RadError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("aot550", "0.1")
        .with_hint("example")
}

#[test]
fn scenario_error_surface() {
    let err = RadError::Scenario(sample_info("latitude-range", "latitude out of range"));
    assert_eq!(err.info().code, "latitude-range");
    assert!(err.info().context.contains_key("aot550"));
}

#[test]
fn engine_error_surface() {
    let err = RadError::Engine(sample_info("engine-timeout", "engine run timed out"));
    assert_eq!(err.info().code, "engine-timeout");
    assert_eq!(err.info().hint.as_deref(), Some("example"));
}

#[test]
fn export_error_surface() {
    let err = RadError::Export(sample_info("export-persist", "could not finalize artifact"));
    assert_eq!(err.info().code, "export-persist");
}

#[test]
fn display_carries_code_and_hint() {
    let err = RadError::Engine(sample_info("engine-exit", "engine exited with status 1"));
    let rendered = err.to_string();
    assert!(rendered.contains("engine-exit"));
    assert!(rendered.contains("hint: example"));
}
