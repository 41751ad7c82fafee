//! Turns a free-form port description into a query the provider can geocode.
//!
//! Normalization is an ordered list of pure `&str -> String` steps so each rule
//! can be exercised on its own.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Facility words that confuse geocoding. `free zone` must precede `zone`.
static FACILITY_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:free\s+zone|port|terminal|hub|zone)\b").unwrap());

static TRAILING_REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([A-Za-z]{2})\s*$").unwrap());

/// Region suffixes seen in shipment data, mapped to ISO 3166 country codes.
const REGION_CODES: &[(&str, &str)] = &[
    ("mh", "IN"),
    ("au", "AU"),
    ("in", "IN"),
    ("uk", "GB"),
    ("us", "US"),
    ("de", "DE"),
    ("ae", "AE"),
    ("sg", "SG"),
    ("br", "BR"),
    ("bd", "BD"),
    ("vn", "VN"),
    ("be", "BE"),
    ("fr", "FR"),
];

type Step = fn(&str) -> String;

const PIPELINE: &[Step] = &[strip_facility_tokens, remap_region_code, trim];

/// Apply every normalization step in order.
pub fn normalize_location(location: &str) -> String {
    PIPELINE
        .iter()
        .fold(location.to_string(), |acc, step| step(&acc))
}

/// Remove whole-word `port`, `terminal`, `hub`, `zone` and `free zone`, any case.
pub fn strip_facility_tokens(input: &str) -> String {
    FACILITY_TOKENS.replace_all(input, "").into_owned()
}

/// Rewrite a trailing `, xx` region code to the provider's country code.
///
/// Unknown codes are kept as written, re-attached directly after the comma.
pub fn remap_region_code(input: &str) -> String {
    TRAILING_REGION
        .replace(input, |caps: &Captures<'_>| {
            let code = &caps[1];
            let mapped = lookup_region(code).unwrap_or(code);
            format!(",{mapped}")
        })
        .into_owned()
}

pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

fn lookup_region(code: &str) -> Option<&'static str> {
    let lower = code.to_ascii_lowercase();
    REGION_CODES
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| *to)
}
