//! In-memory backend for unit tests.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;

use crate::{
    backend::WeatherBackend,
    error::BackendError,
    model::{CurrentConditions, ForecastDay, LocationCandidate, WeatherCode, WeatherReport},
};

const DEFAULT_TEMPERATURE: f64 = 20.0;

#[derive(Debug)]
struct ScriptedSearch {
    delay: Duration,
    /// `None` means the request fails.
    result: Option<Vec<LocationCandidate>>,
}

/// Scripted responses keyed by search term and by coordinate.
///
/// Unknown terms return no candidates; unknown coordinates succeed at 20 °C.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    searches: HashMap<String, ScriptedSearch>,
    /// `None` temperature means the request fails.
    weather: Vec<((f64, f64), Duration, Option<f64>)>,
    search_calls: Mutex<Vec<String>>,
    weather_calls: Mutex<Vec<(f64, f64)>>,
}

impl FakeBackend {
    pub fn with_search(self, term: &str, found: Vec<LocationCandidate>) -> Self {
        self.with_slow_search(term, Duration::ZERO, found)
    }

    pub fn with_slow_search(
        mut self,
        term: &str,
        delay: Duration,
        found: Vec<LocationCandidate>,
    ) -> Self {
        self.searches
            .insert(term.to_string(), ScriptedSearch { delay, result: Some(found) });
        self
    }

    pub fn with_failing_search(mut self, term: &str) -> Self {
        self.searches
            .insert(term.to_string(), ScriptedSearch { delay: Duration::ZERO, result: None });
        self
    }

    pub fn with_temperature(self, latitude: f64, longitude: f64, temperature: f64) -> Self {
        self.with_slow_weather(latitude, longitude, Duration::ZERO, temperature)
    }

    pub fn with_slow_weather(
        mut self,
        latitude: f64,
        longitude: f64,
        delay: Duration,
        temperature: f64,
    ) -> Self {
        self.weather.push(((latitude, longitude), delay, Some(temperature)));
        self
    }

    pub fn with_failing_weather(mut self, latitude: f64, longitude: f64) -> Self {
        self.weather.push(((latitude, longitude), Duration::ZERO, None));
        self
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn weather_calls(&self) -> Vec<(f64, f64)> {
        self.weather_calls.lock().unwrap().clone()
    }
}

fn server_error(path: &str) -> BackendError {
    BackendError::Status {
        url: format!("http://fake/api/{path}"),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "scripted failure".into(),
    }
}

#[async_trait]
impl WeatherBackend for FakeBackend {
    async fn search_location(&self, term: &str) -> Result<Vec<LocationCandidate>, BackendError> {
        self.search_calls.lock().unwrap().push(term.to_string());

        let Some(scripted) = self.searches.get(term) else {
            return Ok(Vec::new());
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result.clone().ok_or_else(|| server_error("search-location"))
    }

    async fn get_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, BackendError> {
        self.weather_calls.lock().unwrap().push((latitude, longitude));

        let (delay, scripted) = self
            .weather
            .iter()
            .find(|(coord, _, _)| *coord == (latitude, longitude))
            .map(|(_, delay, temp)| (*delay, *temp))
            .unwrap_or((Duration::ZERO, Some(DEFAULT_TEMPERATURE)));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        scripted.map(report).ok_or_else(|| server_error("weather"))
    }
}

pub(crate) fn candidate(name: &str, latitude: f64, longitude: f64) -> LocationCandidate {
    LocationCandidate {
        name: name.to_string(),
        admin1: None,
        country: "Kenya".to_string(),
        latitude,
        longitude,
    }
}

pub(crate) fn report(temperature: f64) -> WeatherReport {
    let first = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let forecast = first
        .iter_days()
        .take(7)
        .map(|date| ForecastDay {
            date,
            temp_max: temperature + 4.0,
            temp_min: temperature - 6.0,
            precipitation: 0.0,
            weather_code: WeatherCode(1),
        })
        .collect();

    WeatherReport {
        current: CurrentConditions {
            temperature,
            humidity: 60.0,
            wind_speed: 10.0,
            precipitation: 0.0,
            weather_code: WeatherCode(2),
            time: None,
        },
        forecast,
    }
}
