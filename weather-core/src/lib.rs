//! Core library for the `kenya-weather` CLI.
//!
//! This crate defines:
//! - Shared domain models (locations, current conditions, forecast days)
//! - The weather-code lookup tables
//! - The backend client abstraction and its HTTP implementation
//! - The search/pick/weather state machine and the batch overview
//! - Configuration handling
//!
//! It is used by `kenya-weather-cli`, but can also be reused by other front ends.

pub mod backend;
pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod overview;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{HttpWeatherClient, WeatherBackend};
pub use config::Config;
pub use error::BackendError;
pub use model::{CurrentConditions, ForecastDay, LocationCandidate, WeatherCode, WeatherReport};
pub use overview::{
    KENYA_CENTER, KENYA_POINTS, Overview, OverviewStats, TemperatureBand, fetch_overview,
};
pub use shell::{Failure, Shell, ViewState};
