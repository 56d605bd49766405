//! Input deck rendering for the engine subprocess.

use radsweep_core::Scenario;

/// Renders the stdin deck describing one scenario.
///
/// Line order is fixed: atmosphere, ground, optional aerosol override,
/// wavelength grid, run. Wavelengths are written with four decimals, the
/// resolution of the sensor grids.
pub fn render_deck(scenario: &Scenario) -> String {
    let mut deck = String::new();
    deck.push_str(&format!(
        "atmosphere {}\n",
        scenario.atmosphere().deck_token()
    ));
    deck.push_str(&format!(
        "ground homogeneous_lambertian {}\n",
        scenario.ground.deck_token()
    ));
    if let Some(aot550) = scenario.aot550 {
        deck.push_str(&format!("aot550 {aot550}\n"));
    }
    let grid = scenario
        .sensor
        .wavelengths()
        .iter()
        .map(|wavelength| format!("{wavelength:.4}"))
        .collect::<Vec<_>>()
        .join(" ");
    deck.push_str(&format!("wavelengths {grid}\n"));
    deck.push_str("run\n");
    deck
}
