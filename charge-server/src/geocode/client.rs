//! Mapbox Geocoding v5 client.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::types::{Feature, FeatureCollection};
use super::Place;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Configuration for the Mapbox client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Mapbox access token
    pub access_token: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of autocomplete suggestions
    pub suggestion_limit: u8,
}

impl GeocoderConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            suggestion_limit: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_suggestion_limit(mut self, n: u8) -> Self {
        self.suggestion_limit = n;
        self
    }
}

/// Client for the `mapbox.places` endpoint.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
    suggestion_limit: u8,
}

impl MapboxClient {
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GeocodeError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GeocodeError::Config(format!(
                "base URL '{}' cannot have a path",
                config.base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token,
            suggestion_limit: config.suggestion_limit,
        })
    }

    /// Build `{base}/geocoding/v5/mapbox.places/{search}.json?access_token=...`.
    ///
    /// The search text is a single path segment, so `/` and `?` in user
    /// input are percent-encoded.
    fn places_url(&self, search: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["geocoding", "v5", "mapbox.places", &format!("{search}.json")]);
        }
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }

    async fn request(&self, url: Url) -> Result<FeatureCollection, GeocodeError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeocodeError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }

    /// Resolve free text to the best-matching place.
    pub async fn forward(&self, query: &str) -> Result<Place, GeocodeError> {
        let url = self.places_url(
            query,
            &[("autocomplete", "false".into()), ("limit", "1".into())],
        );
        let collection = self.request(url).await?;

        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_string(),
            })?;

        let place = to_place(feature)?;
        debug!(query, location = %place.location, "geocoded");
        Ok(place)
    }

    /// Reverse lookups carry no `limit`. Mapbox only accepts one there
    /// together with a single `types` value.
    fn reverse_url(&self, at: Coordinate) -> Url {
        self.places_url(&format!("{},{}", at.longitude(), at.latitude()), &[])
    }

    /// Display name of the place at `at`.
    pub async fn reverse(&self, at: Coordinate) -> Result<String, GeocodeError> {
        let collection = self.request(self.reverse_url(at)).await?;

        collection
            .features
            .into_iter()
            .find_map(|f| f.place_name)
            .ok_or_else(|| GeocodeError::NotFound {
                query: at.to_string(),
            })
    }

    /// Autocomplete suggestions for partial input.
    ///
    /// Features without a usable position are skipped.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let url = self.places_url(
            query,
            &[
                ("autocomplete", "true".into()),
                ("limit", self.suggestion_limit.to_string()),
            ],
        );
        let collection = self.request(url).await?;

        Ok(collection
            .features
            .into_iter()
            .filter_map(|f| to_place(f).ok())
            .collect())
    }
}

fn to_place(feature: Feature) -> Result<Place, GeocodeError> {
    let location = Coordinate::from_lon_lat(&feature.center)?;
    Ok(Place {
        id: feature.id,
        name: feature.place_name,
        location,
    })
}
