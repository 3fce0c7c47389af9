//! Provider access.
//!
//! [`SolarDataSource`] is the seam the scheduler drives; [`HttpSolarClient`]
//! is the production implementation. One call issues exactly one request and
//! never retries.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use super::model::SolarSnapshot;
use crate::error::{Result, SolarError};

/// Path of the snapshot endpoint, relative to the provider base URL.
pub const SOLAR_DATA_PATH: &str = "/api/solar-data";

/// Longest slice of an error body kept in a server error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Anything able to produce a fresh [`SolarSnapshot`].
pub trait SolarDataSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<SolarSnapshot>> + Send;
}

/// HTTP client for `GET {base_url}/api/solar-data`.
#[derive(Debug, Clone)]
pub struct HttpSolarClient {
    client: Client,
    endpoint: Url,
}

impl HttpSolarClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("solar-guardian/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SolarError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SolarDataSource for HttpSolarClient {
    async fn fetch(&self) -> Result<SolarSnapshot> {
        log::debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SolarError::server(
                status.as_u16(),
                server_message(status, &body),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SolarError::network(format!("failed to read response body: {}", e)))?;

        SolarSnapshot::from_json(&body)
    }
}

/// Build the snapshot endpoint from a base URL such as `http://localhost:8000/`.
pub fn endpoint_url(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(SolarError::config(format!(
            "Provider URL must start with http:// or https://: {}",
            base_url
        )));
    }

    Url::parse(&format!("{}{}", base, SOLAR_DATA_PATH))
        .map_err(|e| SolarError::config(format!("Invalid provider URL '{}': {}", base_url, e)))
}

fn request_error(err: reqwest::Error) -> SolarError {
    if err.is_timeout() {
        SolarError::network("request timed out")
    } else if err.is_connect() {
        SolarError::network(format!("connection failed: {}", err))
    } else {
        SolarError::network(err.to_string())
    }
}

fn server_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/solar-data");

        let url = endpoint_url("https://example.org/space/").unwrap();
        assert_eq!(url.as_str(), "https://example.org/space/api/solar-data");
    }

    #[test]
    fn test_endpoint_url_rejects_other_schemes() {
        assert!(matches!(
            endpoint_url("ftp://example.org"),
            Err(SolarError::Config(_))
        ));
        assert!(matches!(endpoint_url("localhost:8000"), Err(SolarError::Config(_))));
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
        assert_eq!(
            server_message(StatusCode::INTERNAL_SERVER_ERROR, " upstream down \n"),
            "upstream down"
        );
        let long = "x".repeat(500);
        assert_eq!(
            server_message(StatusCode::BAD_GATEWAY, &long).len(),
            MAX_ERROR_BODY_CHARS
        );
    }
}
