//! Integration tests for [`NominatimGeocoder`] against a mock server.

use std::time::Duration;

use geo::Coord;
use routewise_core::{GeocodeError, Geocoder};
use routewise_data::DEFAULT_USER_AGENT;
use routewise_data::geocoding::{NominatimConfig, NominatimGeocoder};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> NominatimGeocoder {
    NominatimGeocoder::new(server.uri()).expect("geocoder should build")
}

#[tokio::test]
async fn resolves_first_match_as_lon_lat() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "10 Downing Street, London"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "51.5033635", "lon": "-0.1276248", "display_name": "10 Downing Street"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coordinate = geocoder(&server)
        .geocode("10 Downing Street, London")
        .await
        .expect("lookup succeeds");

    assert_eq!(
        coordinate,
        Some(Coord {
            x: -0.127_624_8,
            y: 51.503_363_5
        })
    );
}

#[tokio::test]
async fn empty_results_mean_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let coordinate = geocoder(&server)
        .geocode("Atlantis")
        .await
        .expect("lookup succeeds");

    assert_eq!(coordinate, None);
}

#[tokio::test]
async fn server_errors_are_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = geocoder(&server)
        .geocode("Main St")
        .await
        .expect_err("lookup fails");

    assert_eq!(err, GeocodeError::provider("HTTP 503 Service Unavailable"));
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let geocoder = NominatimGeocoder::with_config(
        NominatimConfig::new(server.uri()).with_timeout(Duration::from_millis(200)),
    )
    .expect("geocoder should build");

    let err = geocoder.geocode("Slow Road").await.expect_err("lookup times out");

    assert!(err.is_timeout(), "expected a timeout, got {err:?}");
}

#[tokio::test]
async fn malformed_bodies_are_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = geocoder(&server)
        .geocode("Main St")
        .await
        .expect_err("lookup fails");

    assert!(matches!(err, GeocodeError::Provider { .. }));
}
