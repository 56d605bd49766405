use radsweep_core::{
    parse_date, BaseParams, FlatRow, GroundReflectance, ScalarSummary, Sensor, SimulationOutput,
    SweepFailure, SweepResult, SweepSuccess,
};

#[test]
fn sweep_result_roundtrips_through_json() {
    let output = SimulationOutput::new(
        vec![0.4775, 0.5613],
        vec![40.1, 38.2],
        ScalarSummary {
            apparent_reflectance: 0.12,
            apparent_radiance: 41.5,
            water_vapour_transmittance_downward: 0.91,
        },
    )
    .expect("valid output");
    let result = SweepResult {
        successes: vec![SweepSuccess {
            aot550: 0.1,
            output,
        }],
        failures: vec![SweepFailure {
            aot550: -999.0,
            reason: "engine exited with status 1".to_string(),
        }],
    };
    let encoded = serde_json::to_string(&result).expect("encode");
    let decoded: SweepResult = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(result, decoded);
    assert_eq!(decoded.attempted(), 2);
}

#[test]
fn base_params_use_snake_case_tokens() {
    let base = BaseParams {
        latitude: 50.0,
        date: parse_date("2024-07-14").expect("date"),
        ground: GroundReflectance::GreenVegetation,
        sensor: Sensor::LandsatEtm,
    };
    let encoded = serde_json::to_string(&base).expect("encode");
    assert!(encoded.contains("\"green_vegetation\""));
    assert!(encoded.contains("\"landsat_etm\""));
    assert!(encoded.contains("\"2024-07-14\""));
}

#[test]
fn flat_row_field_order_is_stable() {
    let row = FlatRow {
        wavelength: 0.4775,
        radiance: 40.1,
        sweep_value: 0.1,
    };
    let encoded = serde_json::to_string(&row).expect("encode");
    let wavelength = encoded.find("wavelength").expect("wavelength field");
    let radiance = encoded.find("radiance").expect("radiance field");
    let sweep = encoded.find("sweep_value").expect("sweep_value field");
    assert!(wavelength < radiance && radiance < sweep);
}
