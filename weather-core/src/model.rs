use serde::{Deserialize, Serialize};

use crate::classify::{compass_direction, round_half_up, severity_for_code};

/// Description used in place of provider text when no live data could be fetched.
pub const UNAVAILABLE_DESCRIPTION: &str = "Weather data unavailable";

/// Icon code used when the provider gives none.
pub const DEFAULT_ICON: &str = "01d";

/// Inbound request: the ports at either end of a shipment leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl WeatherQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
        }
    }
}

/// Coarse weather risk shown next to a route leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Calm,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Calm => "calm",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-neutral observation, still in provider units (m/s, metres, degrees).
///
/// Every field is optional: providers routinely omit blocks of their payload
/// and the mapping into [`WeatherResult`] decides what a gap turns into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    pub wind_deg: Option<f64>,
    pub visibility_m: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition_code: Option<i64>,
}

/// Weather for a single location, as returned to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location: String,
    pub temp_c: Option<i64>,
    pub description: String,
    pub icon: String,
    pub humidity: Option<i64>,
    pub wind_speed: Option<i64>,
    pub wind_dir: String,
    pub feels_like: Option<i64>,
    pub visibility: Option<i64>,
    pub conditions_code: Option<i64>,
    pub severity: Severity,
}

impl WeatherResult {
    /// Placeholder record for a location whose provider lookup failed.
    pub fn fallback(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            temp_c: None,
            description: UNAVAILABLE_DESCRIPTION.to_string(),
            icon: DEFAULT_ICON.to_string(),
            humidity: None,
            wind_speed: None,
            wind_dir: String::new(),
            feels_like: None,
            visibility: None,
            conditions_code: None,
            severity: Severity::Calm,
        }
    }

    /// Map a live observation for `location` into the dashboard shape.
    ///
    /// A missing temperature becomes `0` rather than `null`; the dashboard
    /// relies on that.
    pub fn from_conditions(location: impl Into<String>, conditions: CurrentConditions) -> Self {
        Self {
            location: location.into(),
            temp_c: Some(round_half_up(conditions.temp_c.unwrap_or(0.0))),
            description: conditions
                .description
                .unwrap_or_else(|| "Unknown".to_string()),
            icon: conditions.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            humidity: conditions.humidity_pct.map(round_half_up),
            wind_speed: conditions.wind_speed_mps.map(|mps| round_half_up(mps * 3.6)),
            wind_dir: conditions
                .wind_deg
                .map(|deg| compass_direction(deg).to_string())
                .unwrap_or_default(),
            feels_like: conditions.feels_like_c.map(round_half_up),
            visibility: conditions.visibility_m.map(|m| round_half_up(m / 1000.0)),
            conditions_code: conditions.condition_code,
            severity: severity_for_code(conditions.condition_code),
        }
    }
}

/// Outbound payload: one slot per requested end of the route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub origin: Option<WeatherResult>,
    pub destination: Option<WeatherResult>,
}
