//! Mapbox Geocoding v5 response DTOs.

use serde::Deserialize;

/// `mapbox.places` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub id: Option<String>,

    /// Full display name, e.g. "Philadelphia, Pennsylvania, United States".
    pub place_name: Option<String>,

    /// `[longitude, latitude]`.
    #[serde(default)]
    pub center: Vec<f64>,
}
