use criterion::{criterion_group, criterion_main, Criterion};
use radsweep_core::{
    parse_date, BaseParams, GroundReflectance, RadError, ScalarSummary, Scenario, Sensor,
    SimulationOutput,
};
use radsweep_engine::Engine;
use radsweep_exp::{flatten, run_sweep, Scheduler};

struct StubEngine;

impl Engine for StubEngine {
    fn simulate(&self, scenario: &Scenario) -> Result<SimulationOutput, RadError> {
        let aot550 = scenario.aot550.unwrap_or_default();
        let wavelengths: Vec<f64> = (0..100).map(|step| 0.40 + 0.01 * step as f64).collect();
        let radiance: Vec<f64> = wavelengths
            .iter()
            .map(|wavelength| 40.0 * (-aot550 * wavelength).exp())
            .collect();
        SimulationOutput::new(
            wavelengths,
            radiance,
            ScalarSummary {
                apparent_reflectance: 0.1,
                apparent_radiance: 40.0,
                water_vapour_transmittance_downward: 0.9,
            },
        )
    }
}

fn bench_sweep(c: &mut Criterion) {
    let base = BaseParams {
        latitude: 50.0,
        date: parse_date("2024-07-14").expect("date"),
        ground: GroundReflectance::GreenVegetation,
        sensor: Sensor::Vnir,
    };
    let values: Vec<f64> = (0..32).map(|step| 0.1 + 0.05 * step as f64).collect();
    let scheduler = Scheduler { parallelism: 4 };

    c.bench_function("sweep_flatten_32x100", |bencher| {
        bencher.iter(|| {
            let result = run_sweep(&StubEngine, &base, &values, &scheduler).expect("sweep");
            flatten(&result)
        })
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
