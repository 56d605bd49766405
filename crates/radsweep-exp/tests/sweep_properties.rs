use proptest::prelude::*;
use radsweep_core::{
    parse_date, BaseParams, ErrorInfo, GroundReflectance, RadError, ScalarSummary, Scenario,
    Sensor, SimulationOutput,
};
use radsweep_engine::Engine;
use radsweep_exp::{flatten, run_sweep, Scheduler};

const SPECTRUM_LEN: usize = 3;

struct StubEngine;

impl Engine for StubEngine {
    fn simulate(&self, scenario: &Scenario) -> Result<SimulationOutput, RadError> {
        let aot550 = scenario.aot550.unwrap_or_default();
        if aot550 < 0.0 {
            return Err(RadError::Engine(ErrorInfo::new(
                "engine-exit",
                "aerosol loading rejected",
            )));
        }
        SimulationOutput::new(
            vec![0.40, 0.50, 0.60],
            vec![aot550, aot550 + 1.0, aot550 + 2.0],
            ScalarSummary {
                apparent_reflectance: 0.1,
                apparent_radiance: 40.0,
                water_vapour_transmittance_downward: 0.9,
            },
        )
    }
}

fn base() -> BaseParams {
    BaseParams {
        latitude: 50.0,
        date: parse_date("2024-07-14").expect("date"),
        ground: GroundReflectance::GreenVegetation,
        sensor: Sensor::LandsatEtm,
    }
}

proptest! {
    #[test]
    fn every_element_is_accounted_for_once(
        values in proptest::collection::vec(-1.0f64..3.0, 0..24),
        parallelism in 1usize..5,
    ) {
        let scheduler = Scheduler { parallelism };
        let result = run_sweep(&StubEngine, &base(), &values, &scheduler).unwrap();
        prop_assert_eq!(result.attempted(), values.len());

        let expected_successes: Vec<f64> =
            values.iter().copied().filter(|value| *value >= 0.0).collect();
        let expected_failures: Vec<f64> =
            values.iter().copied().filter(|value| *value < 0.0).collect();
        let successes: Vec<f64> =
            result.successes.iter().map(|success| success.aot550).collect();
        let failures: Vec<f64> =
            result.failures.iter().map(|failure| failure.aot550).collect();
        prop_assert_eq!(successes, expected_successes);
        prop_assert_eq!(failures, expected_failures);

        let rows = flatten(&result);
        prop_assert_eq!(rows.len(), result.successes.len() * SPECTRUM_LEN);
        for (idx, success) in result.successes.iter().enumerate() {
            let group = &rows[idx * SPECTRUM_LEN..(idx + 1) * SPECTRUM_LEN];
            prop_assert!(group.iter().all(|row| row.sweep_value == success.aot550));
            prop_assert!(group.windows(2).all(|pair| pair[0].wavelength < pair[1].wavelength));
        }
    }
}
