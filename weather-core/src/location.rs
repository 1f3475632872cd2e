use async_trait::async_trait;
use serde::Deserialize;

use crate::model::Coordinate;

/// Errors from position acquisition. Surfaced to the caller as-is; the
/// default-weather path is a separate explicit opt-in, not a fallback chain.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Single-shot position lookup. No watch/continuous mode.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Source that always yields a known coordinate (tests, `--location`).
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource(pub Coordinate);

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Resolves the machine's position from an IP-geolocation endpoint.
/// Best effort and coarse, but the closest a headless process gets to a
/// device location API.
#[derive(Debug, Clone)]
pub struct IpPositionSource {
    http: reqwest::Client,
    endpoint: String,
}

impl IpPositionSource {
    const DEFAULT_ENDPOINT: &'static str = "https://ipapi.co/json/";

    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for IpPositionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionSource for IpPositionSource {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        let response = self.http.get(&self.endpoint).send().await.map_err(|e| {
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::Other(e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }

        let parsed: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(e.to_string()))?;

        match (parsed.latitude, parsed.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
            // Endpoint answered but gave no usable fix.
            _ => Err(LocationError::Unsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;

    /// Serve a stub lookup endpoint on an ephemeral port, returning its URL.
    async fn spawn_endpoint(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        format!("http://{addr}/json/")
    }

    #[tokio::test]
    async fn ip_source_resolves_coordinates() {
        let app = Router::new()
            .fallback(|| async { r#"{"latitude": 48.85, "longitude": 2.35}"# });
        let endpoint = spawn_endpoint(app).await;

        let position = IpPositionSource::with_endpoint(endpoint)
            .current_position()
            .await
            .expect("must resolve");

        assert_eq!(position, Coordinate::new(48.85, 2.35));
    }

    #[tokio::test]
    async fn answer_without_usable_fix_maps_to_unsupported() {
        let app = Router::new().fallback(|| async { "{}" });
        let endpoint = spawn_endpoint(app).await;

        let err = IpPositionSource::with_endpoint(endpoint)
            .current_position()
            .await
            .expect_err("must fail");

        assert!(matches!(err, LocationError::Unsupported));
    }

    #[tokio::test]
    async fn forbidden_endpoint_maps_to_permission_denied() {
        let app = Router::new()
            .fallback(|| async { (axum::http::StatusCode::FORBIDDEN, "blocked") });
        let endpoint = spawn_endpoint(app).await;

        let err = IpPositionSource::with_endpoint(endpoint)
            .current_position()
            .await
            .expect_err("must fail");

        assert!(matches!(err, LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn fixed_source_returns_its_coordinate() {
        let source = FixedPositionSource(Coordinate::new(1.0, 2.0));
        let position = source.current_position().await.expect("must resolve");

        assert_eq!(position, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn unsupported_error_message() {
        assert_eq!(
            LocationError::Unsupported.to_string(),
            "Geolocation is not supported"
        );
    }

    #[test]
    fn lookup_response_tolerates_missing_fields() {
        let parsed: IpLookupResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.latitude.is_none());
        assert!(parsed.longitude.is_none());
    }
}
