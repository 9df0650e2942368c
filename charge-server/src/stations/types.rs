//! Open Charge Map API response DTOs.
//!
//! These types map directly to the `/v3/poi` JSON response. Nearly every
//! field is optional because community-submitted records are frequently
//! incomplete.

use serde::Deserialize;

/// A point of interest (one charging location).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoiDto {
    #[serde(rename = "ID")]
    pub id: Option<i64>,

    #[serde(rename = "UUID")]
    pub uuid: Option<String>,

    pub address_info: Option<AddressInfoDto>,

    /// Usage classification, e.g. "Public - Membership Required".
    pub usage_type: Option<TitledDto>,

    /// Free-text pricing.
    pub usage_cost: Option<String>,

    pub operator_info: Option<OperatorInfoDto>,

    pub general_comments: Option<String>,

    /// Opening hours. Not part of the standard OCM schema, but present in
    /// some mirrored datasets.
    pub opening_times: Option<Vec<OpeningTimeDto>>,

    /// Plain-text reviews, as some mirrored datasets provide them.
    pub reviews: Option<Vec<String>>,

    /// Community check-ins and comments.
    pub user_comments: Option<Vec<UserCommentDto>>,

    pub connections: Option<Vec<ConnectionDto>>,
}

/// Location and postal address of a POI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressInfoDto {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<TitledDto>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Any reference-data object where only the title matters to us.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TitledDto {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperatorInfoDto {
    pub title: Option<String>,
    #[serde(rename = "WebsiteURL")]
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpeningTimeDto {
    pub day_of_week: String,
    pub opening_time: String,
    pub closing_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCommentDto {
    pub comment: Option<String>,
    pub user_name: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionDto {
    pub connection_type: Option<TitledDto>,
    #[serde(rename = "PowerKW")]
    pub power_kw: Option<f64>,
    pub quantity: Option<u32>,
}
