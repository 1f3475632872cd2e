use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::{
    config::{Config, DEFAULT_DISTRICT_ID},
    model::{Coordinate, WeatherResponse},
};

/// Errors surfaced by [`WeatherClient`]. Never retried, never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success HTTP status from the proxy path.
    #[error("HTTP error! status: {status}")]
    Http { status: StatusCode },

    /// Response body was not valid JSON for the expected shape.
    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport-level failure (connect, read, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Client for the local weather proxy.
///
/// Issues exactly one GET per call; no caching, no de-duplication of
/// concurrent identical requests, no retry on failure.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
    district_id: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            district_id: DEFAULT_DISTRICT_ID.to_string(),
        }
    }

    /// Build a client from the on-disk configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;

        Ok(Self {
            http: Client::new(),
            base_url: config.client_base_url(),
            api_key: api_key.to_string(),
            district_id: config.district_id().to_string(),
        })
    }

    /// Request URL for a coordinate. The query string is built verbatim so
    /// the `location=lat,lng` pair reaches the upstream with a literal comma.
    fn request_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/weather/?district_id={}&data_type=all&ak={}&location={}",
            self.base_url, self.district_id, self.api_key, coordinate
        )
    }

    /// Fetch current conditions and forecast for an explicit coordinate.
    pub async fn get_weather_by_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherResponse, ClientError> {
        self.fetch(Coordinate::new(latitude, longitude)).await
    }

    /// Fetch weather for the hardcoded Beijing coordinate. Explicit opt-in
    /// path; never consults a position source.
    pub async fn get_default_weather(&self) -> Result<WeatherResponse, ClientError> {
        self.fetch(Coordinate::BEIJING).await
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherResponse, ClientError> {
        let url = self.request_url(coordinate);

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http { status });
        }

        let body = response.text().await?;
        let parsed: WeatherResponse = serde_json::from_str(&body)?;

        Ok(parsed)
    }
}
