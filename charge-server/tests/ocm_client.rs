//! Integration tests for `OcmClient` against a wiremock server.

use charge_server::domain::{Coordinate, StationId};
use charge_server::stations::{OcmClient, OcmConfig, StationError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OcmClient {
    OcmClient::new(OcmConfig::new("ocm-key").with_base_url(base_url))
        .expect("client construction should not fail")
}

fn philadelphia() -> Coordinate {
    Coordinate::new(39.95, -75.16).unwrap()
}

#[tokio::test]
async fn fetch_stations_sends_search_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/poi/"))
        .and(header("x-api-key", "ocm-key"))
        .and(query_param("output", "json"))
        .and(query_param("latitude", "39.95"))
        .and(query_param("longitude", "-75.16"))
        .and(query_param("distance", "10"))
        .and(query_param("distanceunit", "KM"))
        .and(query_param("maxresults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "ID": 7,
                "UsageType": { "Title": "Public" },
                "AddressInfo": { "Title": "City Hall", "Latitude": 39.9529, "Longitude": -75.1636 }
            },
            { "UsageCost": "dropped, no id" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let stations = test_client(&server.uri())
        .fetch_stations(philadelphia())
        .await
        .unwrap();

    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, StationId::Numeric(7));
    assert_eq!(stations[0].category.as_deref(), Some("Public"));
}

#[tokio::test]
async fn fetch_stations_uses_configured_radius_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/poi/"))
        .and(query_param("distance", "25.5"))
        .and(query_param("maxresults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OcmClient::new(
        OcmConfig::new("ocm-key")
            .with_base_url(server.uri())
            .with_radius_km(25.5)
            .with_max_results(50),
    )
    .unwrap();

    let stations = client.fetch_stations(philadelphia()).await.unwrap();
    assert!(stations.is_empty());
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_unauthorized() {
    for status in [401, 403] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).fetch_stations(philadelphia()).await;
        assert!(
            matches!(result, Err(StationError::Unauthorized)),
            "status {status}: {result:?}"
        );
    }
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_stations(philadelphia()).await;
    assert!(matches!(result, Err(StationError::RateLimited)), "{result:?}");
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_stations(philadelphia()).await;
    match result {
        Err(StationError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_stations(philadelphia()).await;
    assert!(matches!(result, Err(StationError::Json { .. })), "{result:?}");
}
