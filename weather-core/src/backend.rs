use crate::{
    error::BackendError,
    model::{LocationCandidate, WeatherReport},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod http;

pub use http::{DEFAULT_BASE_URL, HttpWeatherClient};

/// The two calls the search flow and the overview depend on.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn search_location(&self, term: &str) -> Result<Vec<LocationCandidate>, BackendError>;

    async fn get_weather(&self, latitude: f64, longitude: f64)
    -> Result<WeatherReport, BackendError>;
}

#[async_trait]
impl<T: WeatherBackend + ?Sized> WeatherBackend for Arc<T> {
    async fn search_location(&self, term: &str) -> Result<Vec<LocationCandidate>, BackendError> {
        (**self).search_location(term).await
    }

    async fn get_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, BackendError> {
        (**self).get_weather(latitude, longitude).await
    }
}
