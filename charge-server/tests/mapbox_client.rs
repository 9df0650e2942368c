//! Integration tests for `MapboxClient` against a wiremock server.

use charge_server::domain::Coordinate;
use charge_server::geocode::{GeocodeError, GeocoderConfig, MapboxClient};
use charge_server::search::LookupError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORWARD_PATH: &str = "/geocoding/v5/mapbox.places/Philadelphia.json";
const REVERSE_PATH: &str = "/geocoding/v5/mapbox.places/-75.16,39.95.json";

fn test_client(base_url: &str) -> MapboxClient {
    MapboxClient::new(GeocoderConfig::new("tok").with_base_url(base_url))
        .expect("client construction should not fail")
}

fn philadelphia_feature() -> serde_json::Value {
    json!({
        "id": "place.123",
        "place_name": "Philadelphia, Pennsylvania, United States",
        "center": [-75.1652, 39.9526]
    })
}

#[tokio::test]
async fn forward_returns_first_feature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORWARD_PATH))
        .and(query_param("access_token", "tok"))
        .and(query_param("autocomplete", "false"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "features": [philadelphia_feature()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let place = test_client(&server.uri()).forward("Philadelphia").await.unwrap();

    assert_eq!(place.id.as_deref(), Some("place.123"));
    assert_eq!(place.location.latitude(), 39.9526);
    assert_eq!(place.location.longitude(), -75.1652);
}

#[tokio::test]
async fn forward_with_no_features_is_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORWARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .forward("Philadelphia")
        .await
        .unwrap_err();

    assert!(matches!(err, GeocodeError::NotFound { .. }), "{err:?}");
    assert_eq!(LookupError::from(err), LookupError::LocationNotFound);
}

#[tokio::test]
async fn forward_with_out_of_range_center_is_invalid_coordinate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORWARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [ { "place_name": "Nowhere", "center": [0.0, 123.0] } ]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .forward("Philadelphia")
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidCoordinate(_)), "{err:?}");
}

#[tokio::test]
async fn reverse_sends_no_limit_and_returns_place_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .and(query_param("access_token", "tok"))
        .and(query_param_is_missing("limit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "features": [philadelphia_feature()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let at = Coordinate::new(39.95, -75.16).unwrap();
    let name = test_client(&server.uri()).reverse(at).await.unwrap();
    assert_eq!(name, "Philadelphia, Pennsylvania, United States");
}

#[tokio::test]
async fn reverse_with_no_features_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let at = Coordinate::new(39.95, -75.16).unwrap();
    let err = test_client(&server.uri()).reverse(at).await.unwrap_err();
    assert!(matches!(err, GeocodeError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn suggest_uses_autocomplete_and_skips_unusable_features() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/phil.json"))
        .and(query_param("autocomplete", "true"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                philadelphia_feature(),
                { "id": "poi.9", "place_name": "No centre" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server.uri()).suggest("phil").await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id.as_deref(), Some("place.123"));
}

async fn forward_with_status(status: u16) -> GeocodeError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;

    test_client(&server.uri())
        .forward("Philadelphia")
        .await
        .unwrap_err()
}

#[tokio::test]
async fn error_statuses_are_mapped() {
    assert!(matches!(forward_with_status(401).await, GeocodeError::Unauthorized));
    assert!(matches!(forward_with_status(403).await, GeocodeError::Unauthorized));
    assert!(matches!(forward_with_status(429).await, GeocodeError::RateLimited));

    match forward_with_status(502).await {
        GeocodeError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "nope");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_failures_are_network_failures() {
    for status in [401, 429, 500] {
        let err = LookupError::from(forward_with_status(status).await);
        assert!(matches!(err, LookupError::NetworkFailure(_)), "status {status}: {err:?}");
    }
}

#[tokio::test]
async fn malformed_body_maps_to_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .forward("Philadelphia")
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::Json { .. }), "{err:?}");
}
