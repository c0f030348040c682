//! Weather code → glyph / description lookup.
//!
//! Both tables are ordered; the first matching entry wins and anything
//! unmatched falls through to the fallback value.

use crate::model::WeatherCode;

pub const FALLBACK_GLYPH: &str = "🌤️";
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    Exact(u8),
    /// Inclusive on both ends.
    Range(u8, u8),
    AtLeast(u8),
}

impl CodeMatch {
    pub const fn matches(self, code: u8) -> bool {
        match self {
            CodeMatch::Exact(c) => code == c,
            CodeMatch::Range(lo, hi) => code >= lo && code <= hi,
            CodeMatch::AtLeast(lo) => code >= lo,
        }
    }
}

const GLYPHS: &[(CodeMatch, &str)] = &[
    (CodeMatch::Range(0, 1), "☀️"),
    (CodeMatch::Range(2, 3), "⛅"),
    (CodeMatch::Range(45, 48), "🌫️"),
    (CodeMatch::Range(51, 67), "🌧️"),
    (CodeMatch::Range(71, 77), "🌨️"),
    (CodeMatch::Range(80, 82), "🌦️"),
    (CodeMatch::AtLeast(95), "⛈️"),
];

const DESCRIPTIONS: &[(CodeMatch, &str)] = &[
    (CodeMatch::Exact(0), "Clear sky"),
    (CodeMatch::Exact(1), "Mainly clear"),
    (CodeMatch::Exact(2), "Partly cloudy"),
    (CodeMatch::Exact(3), "Overcast"),
    (CodeMatch::Exact(45), "Foggy"),
    (CodeMatch::Exact(48), "Depositing rime fog"),
    (CodeMatch::Exact(51), "Light drizzle"),
    (CodeMatch::Exact(53), "Moderate drizzle"),
    (CodeMatch::Exact(55), "Dense drizzle"),
    (CodeMatch::Exact(61), "Slight rain"),
    (CodeMatch::Exact(63), "Moderate rain"),
    (CodeMatch::Exact(65), "Heavy rain"),
    (CodeMatch::Exact(71), "Slight snow"),
    (CodeMatch::Exact(73), "Moderate snow"),
    (CodeMatch::Exact(75), "Heavy snow"),
    (CodeMatch::Exact(77), "Snow grains"),
    (CodeMatch::Exact(80), "Slight rain showers"),
    (CodeMatch::Exact(81), "Moderate rain showers"),
    (CodeMatch::Exact(82), "Violent rain showers"),
    (CodeMatch::Exact(85), "Slight snow showers"),
    (CodeMatch::Exact(86), "Heavy snow showers"),
    (CodeMatch::Exact(95), "Thunderstorm"),
    (CodeMatch::Exact(96), "Thunderstorm with slight hail"),
    (CodeMatch::Exact(99), "Thunderstorm with heavy hail"),
];

fn lookup(table: &[(CodeMatch, &'static str)], code: WeatherCode) -> Option<&'static str> {
    table
        .iter()
        .find(|(rule, _)| rule.matches(code.0))
        .map(|(_, value)| *value)
}

pub fn glyph(code: WeatherCode) -> &'static str {
    lookup(GLYPHS, code).unwrap_or(FALLBACK_GLYPH)
}

pub fn description(code: WeatherCode) -> &'static str {
    lookup(DESCRIPTIONS, code).unwrap_or(UNKNOWN_DESCRIPTION)
}
