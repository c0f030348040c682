use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{BackendError, truncate_body},
    model::{
        CodeDescription, HealthStatus, LocationCandidate, SearchResponse, WeatherCode,
        WeatherReport,
    },
};

use super::WeatherBackend;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// Client for the weather backend's JSON API.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    base_url: String,
    http: Client,
}

impl HttpWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /weather-description/{code}`.
    pub async fn describe_code(&self, code: WeatherCode) -> Result<CodeDescription, BackendError> {
        let url = self.endpoint(&format!("weather-description/{code}"));
        let (status, body) = self.get(&url, &[] as &[(&str, &str)]).await?;
        ensure_success(&url, status, &body)?;
        decode(&url, &body)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = self.endpoint("health");
        let (status, body) = self.get(&url, &[] as &[(&str, &str)]).await?;
        ensure_success(&url, status, &body)?;
        decode(&url, &body)
    }

    async fn get<Q>(&self, url: &str, query: &Q) -> Result<(StatusCode, String), BackendError>
    where
        Q: serde::Serialize + ?Sized,
    {
        debug!(url, "GET");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| BackendError::Transport { url: url.to_string(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| BackendError::Transport { url: url.to_string(), source })?;

        debug!(url, %status, bytes = body.len(), "response");
        Ok((status, body))
    }
}

#[async_trait]
impl WeatherBackend for HttpWeatherClient {
    async fn search_location(&self, term: &str) -> Result<Vec<LocationCandidate>, BackendError> {
        let url = self.endpoint("search-location");
        let (status, body) = self.get(&url, &[("location", term)]).await?;

        // The backend answers an unknown place with 404 rather than an empty list.
        if status == StatusCode::NOT_FOUND {
            debug!(term, "no locations matched");
            return Ok(Vec::new());
        }
        ensure_success(&url, status, &body)?;

        let parsed: SearchResponse = decode(&url, &body)?;
        Ok(parsed.locations)
    }

    async fn get_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, BackendError> {
        let url = self.endpoint("weather");
        let (status, body) = self
            .get(&url, &[("lat", latitude), ("lon", longitude)])
            .await?;
        ensure_success(&url, status, &body)?;
        decode(&url, &body)
    }
}

fn ensure_success(url: &str, status: StatusCode, body: &str) -> Result<(), BackendError> {
    if status.is_success() {
        return Ok(());
    }
    Err(BackendError::Status {
        url: url.to_string(),
        status,
        body: truncate_body(body),
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|source| BackendError::Decode { url: url.to_string(), source })
}
