//! Pure classification helpers: condition code → severity, degrees → compass point.

use crate::model::Severity;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Condition-code families, checked in order. Anything outside them is calm.
const SEVERITY_BANDS: &[(std::ops::Range<i64>, Severity)] = &[
    (200..300, Severity::Severe),   // thunderstorm
    (300..400, Severity::Moderate), // drizzle
    (500..600, Severity::Severe),   // rain
    (600..700, Severity::Moderate), // snow
    (700..800, Severity::Moderate), // mist, haze, dust
];

/// Rounds half-way values toward positive infinity (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn severity_for_code(code: Option<i64>) -> Severity {
    let Some(code) = code else {
        return Severity::Calm;
    };

    SEVERITY_BANDS
        .iter()
        .find(|(band, _)| band.contains(&code))
        .map(|(_, severity)| *severity)
        .unwrap_or(Severity::Calm)
}

/// Eight 45° sectors centred on the cardinal and intercardinal points.
pub fn compass_direction(degrees: f64) -> &'static str {
    let sector = round_half_up(degrees / 45.0).rem_euclid(8);
    COMPASS_POINTS[sector as usize]
}
