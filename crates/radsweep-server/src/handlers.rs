//! REST handlers for the single-run and sweep endpoints.
//!
//! Request validation (latitude range, date shape) happens here, before the
//! core is called; the core assumes validated input. Engine work is
//! CPU/subprocess heavy and runs under `spawn_blocking`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use radsweep_core::{
    parse_date, validate_latitude, BaseParams, GroundReflectance, RadError, Scenario, Sensor,
    SimulationOutput,
};
use radsweep_exp::{flatten, run_sweep};
use tracing::{error, info};

use crate::state::{
    AppState, ErrorResponse, RunModelRequest, RunModelResponse, RunSweepRequest, RunSweepResponse,
};

/// POST `/run-model` - runs one scenario and returns its spectrum.
pub async fn run_model_handler(
    State(state): State<AppState>,
    Json(payload): Json<RunModelRequest>,
) -> Response {
    info!(latitude = payload.latitude, sensor = ?payload.sensor, "run-model request");
    let base = match validated_base(payload.latitude, &payload.date, payload.ground, payload.sensor)
    {
        Ok(base) => base,
        Err(response) => return response,
    };

    let engine = Arc::clone(&state.engine);
    let aot550 = payload.aot550;
    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = Scenario::single(&base, aot550);
        engine.simulate(&scenario)
    })
    .await;

    match outcome {
        Ok(Ok(output)) => (StatusCode::OK, Json(model_response(output))).into_response(),
        Ok(Err(err)) => {
            error!(error = %err, "engine invocation failed");
            reject(StatusCode::BAD_GATEWAY, err.to_string())
        }
        Err(err) => reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("engine task failed: {err}"),
        ),
    }
}

/// POST `/run-sweep` - sweeps the engine across aot550 values and returns
/// the flattened dataset plus the persisted CSV artifact path.
pub async fn run_sweep_handler(
    State(state): State<AppState>,
    Json(payload): Json<RunSweepRequest>,
) -> Response {
    info!(
        latitude = payload.latitude,
        elements = payload.aot_values.len(),
        "run-sweep request"
    );
    let base = match validated_base(payload.latitude, &payload.date, payload.ground, payload.sensor)
    {
        Ok(base) => base,
        Err(response) => return response,
    };

    let engine = Arc::clone(&state.engine);
    let exporter = state.exporter.clone();
    let scheduler = state.scheduler.clone();
    let values = payload.aot_values;
    let outcome = tokio::task::spawn_blocking(move || {
        let result = run_sweep(engine.as_ref(), &base, &values, &scheduler)?;
        let rows = flatten(&result);
        let export = exporter.export(&rows);
        Ok::<_, RadError>((rows, result.failures, export))
    })
    .await;

    match outcome {
        Ok(Ok((rows, failures, export))) => {
            let (csv_file, export_error) = match export {
                Ok(artifact) => (Some(artifact.path.display().to_string()), None),
                Err(err) => {
                    error!(error = %err, "sweep export failed");
                    (None, Some(err.to_string()))
                }
            };
            (
                StatusCode::OK,
                Json(RunSweepResponse {
                    data: rows,
                    csv_file,
                    failures,
                    export_error,
                }),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            error!(error = %err, "sweep orchestration failed");
            reject(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(err) => reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("sweep task failed: {err}"),
        ),
    }
}

fn validated_base(
    latitude: f64,
    date: &str,
    ground: GroundReflectance,
    sensor: Sensor,
) -> Result<BaseParams, Response> {
    validate_latitude(latitude)
        .and_then(|()| parse_date(date))
        .map(|date| BaseParams {
            latitude,
            date,
            ground,
            sensor,
        })
        .map_err(|err| reject(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))
}

fn model_response(output: SimulationOutput) -> RunModelResponse {
    RunModelResponse {
        apparent_reflectance: output.summary.apparent_reflectance,
        apparent_radiance: output.summary.apparent_radiance,
        water_vapour_transmittance_downward: output.summary.water_vapour_transmittance_downward,
        wavelengths: output.wavelengths,
        radiance: output.radiance,
    }
}

fn reject(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
