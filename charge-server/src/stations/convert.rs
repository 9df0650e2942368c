//! Conversion from Open Charge Map DTOs to domain stations.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{
    Address, Connection, Coordinate, OpeningTime, Operator, Station, StationDetails, StationId,
    normalize_category,
};

use super::types::{AddressInfoDto, PoiDto};

/// Error converting a single POI record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Neither the POI nor its address carries an ID
    #[error("record has no ID")]
    MissingId,
}

/// Convert one POI into a station.
///
/// The POI `ID` is the station id, falling back to the address ID. A record
/// with neither is rejected. An absent or out-of-range position leaves the
/// station without a location rather than rejecting it.
pub fn convert_poi(poi: &PoiDto) -> Result<Station, ConversionError> {
    let address = poi.address_info.as_ref();

    let id = poi
        .id
        .or_else(|| address.and_then(|a| a.id))
        .map(StationId::Numeric)
        .ok_or(ConversionError::MissingId)?;

    let location = address.and_then(|a| location_of(&id, a));

    let category = normalize_category(poi.usage_type.as_ref().and_then(|u| u.title.clone()));

    let mut reviews: Vec<String> = poi.reviews.clone().unwrap_or_default();
    reviews.extend(
        poi.user_comments
            .iter()
            .flatten()
            .filter_map(|c| c.comment.clone())
            .filter(|c| !c.trim().is_empty()),
    );

    let details = StationDetails {
        name: address.and_then(|a| a.title.clone()),
        address: address.map(convert_address).unwrap_or_default(),
        usage_cost: poi.usage_cost.clone(),
        operator: poi.operator_info.as_ref().map(|o| Operator {
            name: o.title.clone(),
            website: o.website_url.clone(),
        }),
        opening_times: poi
            .opening_times
            .iter()
            .flatten()
            .map(|t| OpeningTime {
                day: t.day_of_week.clone(),
                opens: t.opening_time.clone(),
                closes: t.closing_time.clone(),
            })
            .collect(),
        general_comments: poi.general_comments.clone(),
        reviews,
        connections: poi
            .connections
            .iter()
            .flatten()
            .map(|c| Connection {
                kind: c.connection_type.as_ref().and_then(|t| t.title.clone()),
                power_kw: c.power_kw,
                quantity: c.quantity,
            })
            .collect(),
    };

    Ok(Station {
        id,
        location,
        category,
        details,
    })
}

/// Convert a batch of POIs, skipping invalid records and repeated IDs.
///
/// The first record for a given ID wins.
pub fn convert_pois(pois: &[PoiDto]) -> Vec<Station> {
    let mut seen = HashSet::new();
    let mut stations = Vec::with_capacity(pois.len());

    for (idx, poi) in pois.iter().enumerate() {
        match convert_poi(poi) {
            Ok(station) => {
                if seen.insert(station.id.clone()) {
                    stations.push(station);
                } else {
                    debug!(id = %station.id, "skipping duplicate station");
                }
            }
            Err(e) => warn!(index = idx, uuid = ?poi.uuid, "skipping station record: {e}"),
        }
    }

    stations
}

fn location_of(id: &StationId, address: &AddressInfoDto) -> Option<Coordinate> {
    let (lat, lon) = (address.latitude?, address.longitude?);
    match Coordinate::new(lat, lon) {
        Ok(c) => Some(c),
        Err(e) => {
            debug!(id = %id, "ignoring station position: {e}");
            None
        }
    }
}

fn convert_address(address: &AddressInfoDto) -> Address {
    Address {
        line1: address.address_line1.clone(),
        town: address.town.clone(),
        state_or_province: address.state_or_province.clone(),
        postcode: address.postcode.clone(),
        country: address.country.as_ref().and_then(|c| c.title.clone()),
    }
}
