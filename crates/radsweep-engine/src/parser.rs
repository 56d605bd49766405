//! Parsing of the engine's stdout report.
//!
//! The report carries three `key: value` scalar lines followed by a
//! `spectrum:` block of `wavelength radiance` pairs. Unknown lines outside
//! the spectrum block are ignored so engine banners do not break parsing.

use radsweep_core::{ErrorInfo, RadError, ScalarSummary, SimulationOutput};

/// Parses one engine report into a normalized output record.
pub fn parse_report(report: &str) -> Result<SimulationOutput, RadError> {
    let mut apparent_reflectance = None;
    let mut apparent_radiance = None;
    let mut water_vapour = None;
    let mut wavelengths = Vec::new();
    let mut radiance = Vec::new();
    let mut in_spectrum = false;

    for line in report.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if in_spectrum {
            let (wavelength, sample) = parse_pair(line)?;
            wavelengths.push(wavelength);
            radiance.push(sample);
        } else if line == "spectrum:" {
            in_spectrum = true;
        } else if let Some(rest) = line.strip_prefix("apparent_reflectance:") {
            apparent_reflectance = Some(parse_scalar("apparent_reflectance", rest)?);
        } else if let Some(rest) = line.strip_prefix("apparent_radiance:") {
            apparent_radiance = Some(parse_scalar("apparent_radiance", rest)?);
        } else if let Some(rest) = line.strip_prefix("water_vapour_transmittance_downward:") {
            water_vapour = Some(parse_scalar("water_vapour_transmittance_downward", rest)?);
        }
    }

    if !in_spectrum {
        return Err(RadError::Engine(ErrorInfo::new(
            "report-spectrum-missing",
            "engine report has no spectrum block",
        )));
    }
    let summary = ScalarSummary {
        apparent_reflectance: required("apparent_reflectance", apparent_reflectance)?,
        apparent_radiance: required("apparent_radiance", apparent_radiance)?,
        water_vapour_transmittance_downward: required(
            "water_vapour_transmittance_downward",
            water_vapour,
        )?,
    };
    SimulationOutput::new(wavelengths, radiance, summary)
}

fn parse_pair(line: &str) -> Result<(f64, f64), RadError> {
    let mut fields = line.split_whitespace();
    let pair = match (fields.next(), fields.next(), fields.next()) {
        (Some(first), Some(second), None) => first.parse::<f64>().ok().zip(second.parse().ok()),
        _ => None,
    };
    pair.ok_or_else(|| {
        RadError::Engine(
            ErrorInfo::new("report-spectrum-line", "malformed spectrum line in engine report")
                .with_context("line", line),
        )
    })
}

fn parse_scalar(field: &str, text: &str) -> Result<f64, RadError> {
    text.trim().parse::<f64>().map_err(|err| {
        RadError::Engine(
            ErrorInfo::new("report-scalar-parse", "unreadable scalar value in engine report")
                .with_context("field", field)
                .with_context("value", text.trim())
                .with_hint(err.to_string()),
        )
    })
}

fn required(field: &str, value: Option<f64>) -> Result<f64, RadError> {
    value.ok_or_else(|| {
        RadError::Engine(
            ErrorInfo::new("report-scalar-missing", "scalar field absent from engine report")
                .with_context("field", field),
        )
    })
}
