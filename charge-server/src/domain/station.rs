//! Charging station records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Stable identifier of a charging station.
///
/// Open Charge Map uses integer IDs, but other sources may use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Numeric(n) => write!(f, "{n}"),
            StationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StationId {
    fn from(n: i64) -> Self {
        StationId::Numeric(n)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        StationId::Text(s.to_string())
    }
}

/// A charging station as seen by the ranker.
///
/// Only `id`, `location` and `category` carry semantics. Everything in
/// `details` is passed through for display untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,

    /// Where the station is. `None` when the source gave no usable position.
    pub location: Option<Coordinate>,

    /// Usage classification (e.g. "Public - Pay At Location").
    /// `None` means uncategorized.
    pub category: Option<String>,

    #[serde(default)]
    pub details: StationDetails,
}

impl Station {
    /// Create a station with no descriptive details.
    pub fn new(id: impl Into<StationId>, location: Option<Coordinate>) -> Self {
        Self {
            id: id.into(),
            location,
            category: None,
            details: StationDetails::default(),
        }
    }

    /// Set the category, normalising blank labels to uncategorized.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(Some(category.into()));
        self
    }

    pub fn with_details(mut self, details: StationDetails) -> Self {
        self.details = details;
        self
    }

    /// The name to show for this station.
    pub fn display_name(&self) -> Option<&str> {
        self.details.name.as_deref()
    }
}

/// Trim a category label, treating empty labels as absent.
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Descriptive, display-only station attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationDetails {
    pub name: Option<String>,
    pub address: Address,
    /// Free-text pricing, e.g. "$0.30/kWh".
    pub usage_cost: Option<String>,
    pub operator: Option<Operator>,
    pub opening_times: Vec<OpeningTime>,
    pub general_comments: Option<String>,
    pub reviews: Vec<String>,
    pub connections: Vec<Connection>,
}

/// Postal address parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Single-line address, e.g. "1 Main St, Springfield, IL, 62701, United States".
    ///
    /// Returns `None` when every part is missing.
    pub fn one_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.line1,
            &self.town,
            &self.state_or_province,
            &self.postcode,
            &self.country,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Network operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub name: Option<String>,
    pub website: Option<String>,
}

/// One opening-hours entry, kept as the source wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningTime {
    pub day: String,
    pub opens: String,
    pub closes: String,
}

impl fmt::Display for OpeningTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.day, self.opens, self.closes)
    }
}

/// A connector group at a station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Connector type, e.g. "CCS (Type 2)".
    pub kind: Option<String>,
    pub power_kw: Option<f64>,
    pub quantity: Option<u32>,
}
