//! Immutable simulation scenarios and their construction.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, RadError};
use crate::types::{BaseParams, GroundReflectance, Sensor};

/// Standard atmospheric profile derived from latitude and date.
///
/// Follows the latitude-band rule of the original wrapper: the tropics up
/// to 23.5 degrees, midlatitude up to 66.5 degrees, subarctic beyond, with
/// the season picked from the month and hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereProfile {
    /// Tropical profile, |lat| <= 23.5.
    Tropical,
    /// Midlatitude summer profile.
    MidlatitudeSummer,
    /// Midlatitude winter profile.
    MidlatitudeWinter,
    /// Subarctic summer profile.
    SubarcticSummer,
    /// Subarctic winter profile.
    SubarcticWinter,
}

impl AtmosphereProfile {
    /// Selects the profile for the given latitude and date.
    pub fn from_latitude_and_date(latitude: f64, date: NaiveDate) -> Self {
        let northern = latitude >= 0.0;
        let month = date.month();
        // May through October is summer north of the equator, winter south.
        let summer = (5..=10).contains(&month) == northern;
        match latitude.abs() {
            band if band <= 23.5 => AtmosphereProfile::Tropical,
            band if band <= 66.5 => {
                if summer {
                    AtmosphereProfile::MidlatitudeSummer
                } else {
                    AtmosphereProfile::MidlatitudeWinter
                }
            }
            _ => {
                if summer {
                    AtmosphereProfile::SubarcticSummer
                } else {
                    AtmosphereProfile::SubarcticWinter
                }
            }
        }
    }

    /// Token used for this profile in the engine input deck.
    pub fn deck_token(&self) -> &'static str {
        match self {
            AtmosphereProfile::Tropical => "tropical",
            AtmosphereProfile::MidlatitudeSummer => "midlatitude_summer",
            AtmosphereProfile::MidlatitudeWinter => "midlatitude_winter",
            AtmosphereProfile::SubarcticSummer => "subarctic_summer",
            AtmosphereProfile::SubarcticWinter => "subarctic_winter",
        }
    }
}

/// Fully specified input to one engine invocation.
///
/// Created once per sweep element, never mutated, owned by the invocation
/// that created it. Construction cannot fail; malformed base parameters are
/// rejected by the transport layer before reaching this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Geographic latitude in degrees.
    pub latitude: f64,
    /// Calendar date the atmosphere is derived from.
    pub date: NaiveDate,
    /// Surface reflectance model.
    pub ground: GroundReflectance,
    /// Sensor wavelength selection.
    pub sensor: Sensor,
    /// Aerosol optical thickness at 550 nm; `None` keeps the engine default.
    pub aot550: Option<f64>,
}

impl Scenario {
    /// Builds the scenario for one sweep element.
    pub fn build(base: &BaseParams, sweep_value: f64) -> Self {
        Self {
            latitude: base.latitude,
            date: base.date,
            ground: base.ground,
            sensor: base.sensor,
            aot550: Some(sweep_value),
        }
    }

    /// Builds a single-run scenario with an optional aerosol override.
    pub fn single(base: &BaseParams, aot550: Option<f64>) -> Self {
        Self {
            latitude: base.latitude,
            date: base.date,
            ground: base.ground,
            sensor: base.sensor,
            aot550,
        }
    }

    /// Atmospheric profile implied by this scenario's latitude and date.
    pub fn atmosphere(&self) -> AtmosphereProfile {
        AtmosphereProfile::from_latitude_and_date(self.latitude, self.date)
    }
}

/// Checks that a latitude lies within [-90, 90] degrees.
///
/// Used by the transport layer; the core assumes validated input.
pub fn validate_latitude(latitude: f64) -> Result<(), RadError> {
    if latitude.is_finite() && (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err(RadError::Scenario(
            ErrorInfo::new("latitude-range", "latitude must lie within [-90, 90] degrees")
                .with_context("latitude", latitude.to_string()),
        ))
    }
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(text: &str) -> Result<NaiveDate, RadError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| {
        RadError::Scenario(
            ErrorInfo::new("date-parse", "date must be a valid YYYY-MM-DD calendar date")
                .with_context("date", text)
                .with_hint(err.to_string()),
        )
    })
}
