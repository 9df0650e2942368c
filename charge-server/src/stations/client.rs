//! Open Charge Map POI client.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::domain::{Coordinate, Station};

use super::convert::convert_pois;
use super::error::StationError;
use super::types::PoiDto;

/// Default base URL for the Open Charge Map API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Open Charge Map client.
#[derive(Debug, Clone)]
pub struct OcmConfig {
    /// API key sent in the `X-API-Key` header. Empty means anonymous.
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Search radius around the requested point, in kilometers
    pub radius_km: f64,
    /// Maximum number of POIs per request
    pub max_results: u32,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OcmConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            radius_km: 10.0,
            max_results: 10,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_radius_km(mut self, km: f64) -> Self {
        self.radius_km = km;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Open Charge Map `/poi` endpoint.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct OcmClient {
    http: reqwest::Client,
    base_url: String,
    radius_km: f64,
    max_results: u32,
    semaphore: Arc<Semaphore>,
}

impl OcmClient {
    pub fn new(config: OcmConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();

        if !config.api_key.is_empty() {
            let api_key =
                HeaderValue::from_str(&config.api_key).map_err(|_| StationError::Api {
                    status: 0,
                    message: "Invalid API key format".to_string(),
                })?;
            headers.insert(HeaderName::from_static("x-api-key"), api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("charge-server/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            radius_km: config.radius_km,
            max_results: config.max_results,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch stations within the configured radius of `at`.
    ///
    /// Returns an empty list when nothing is found.
    pub async fn fetch_stations(&self, at: Coordinate) -> Result<Vec<Station>, StationError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| StationError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/poi/", self.base_url);
        debug!(%at, radius_km = self.radius_km, "requesting POIs");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("output", "json".to_string()),
                ("latitude", at.latitude().to_string()),
                ("longitude", at.longitude().to_string()),
                ("distance", self.radius_km.to_string()),
                ("distanceunit", "KM".to_string()),
                ("maxresults", self.max_results.to_string()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StationError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let pois: Vec<PoiDto> = serde_json::from_str(&body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

        let stations = convert_pois(&pois);
        info!(%at, received = pois.len(), kept = stations.len(), "fetched stations");

        Ok(stations)
    }
}
