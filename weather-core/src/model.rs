use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::codes;

/// A named place returned by a text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    /// First-level administrative region (county); the backend sends `""` when unknown.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin1: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// "admin1, country", or just the country when there is no region.
    pub fn region_label(&self) -> String {
        match &self.admin1 {
            Some(admin1) => format!("{admin1}, {}", self.country),
            None => self.country.clone(),
        }
    }
}

/// Numeric condition code as sent by the backend (WMO style, 0..=99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

impl WeatherCode {
    pub fn glyph(self) -> &'static str {
        codes::glyph(self)
    }

    pub fn description(self) -> &'static str {
        codes::description(self)
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
    pub weather_code: WeatherCode,
    /// Local observation time as reported upstream, e.g. `2024-01-15T14:00`.
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation: f64,
    pub weather_code: WeatherCode,
}

/// Current conditions plus the daily outlook for one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeDescription {
    pub code: WeatherCode,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// Body of `GET /search-location`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub locations: Vec<LocationCandidate>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_admin1_decodes_to_none() {
        let json = r#"{"name":"Lamu","admin1":"","country":"Kenya","latitude":-2.27,"longitude":40.9}"#;
        let loc: LocationCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(loc.admin1, None);
        assert_eq!(loc.region_label(), "Kenya");
    }

    #[test]
    fn region_label_includes_admin1() {
        let json = r#"{"name":"Nairobi","admin1":"Nairobi County","country":"Kenya","latitude":-1.28,"longitude":36.81}"#;
        let loc: LocationCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(loc.region_label(), "Nairobi County, Kenya");
    }

    #[test]
    fn weather_report_decodes_backend_shape() {
        let json = r#"{
            "current": {"temperature": 22.4, "humidity": 61, "wind_speed": 11.2,
                        "precipitation": 0.0, "weather_code": 2, "time": "2024-01-15T14:00"},
            "forecast": [
                {"date": "2024-01-15", "temp_max": 26.1, "temp_min": 13.9,
                 "precipitation": 1.2, "weather_code": 61}
            ]
        }"#;
        let report: WeatherReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.current.weather_code, WeatherCode(2));
        assert_eq!(report.current.humidity, 61.0);
        assert_eq!(report.forecast.len(), 1);
        assert_eq!(report.forecast[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }
}
