use radsweep_core::{FlatRow, SweepResult};

/// Expands every successful spectrum into flat rows.
///
/// Pure transform over successes only; failed elements contribute no rows.
/// Rows are grouped by sweep value in sweep order, wavelength ascending
/// within each group, so identical input always yields identical row
/// ordering. The row count equals the sum of the spectrum lengths.
pub fn flatten(result: &SweepResult) -> Vec<FlatRow> {
    let capacity = result
        .successes
        .iter()
        .map(|success| success.output.len())
        .sum();
    let mut rows = Vec::with_capacity(capacity);
    for success in &result.successes {
        let spectrum = success
            .output
            .wavelengths
            .iter()
            .zip(&success.output.radiance);
        for (&wavelength, &radiance) in spectrum {
            rows.push(FlatRow {
                wavelength,
                radiance,
                sweep_value: success.aot550,
            });
        }
    }
    rows
}
