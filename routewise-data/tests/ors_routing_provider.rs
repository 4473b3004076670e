//! Integration tests for [`OrsRoutingProvider`] against a mock server.

use std::time::Duration;

use geo::Coord;
use routewise_core::{DirectionsProvider, DistanceMatrixProvider, RoutingError};
use routewise_data::routing::{OrsConfig, OrsRoutingProvider};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn stops() -> [Coord<f64>; 3] {
    [
        Coord { x: 8.681, y: 49.414 },
        Coord { x: 8.687, y: 49.420 },
        Coord { x: 8.692, y: 49.410 },
    ]
}

fn provider(server: &MockServer) -> OrsRoutingProvider {
    OrsRoutingProvider::with_config(OrsConfig::new(server.uri()).with_api_key(API_KEY))
        .expect("provider should build")
}

#[tokio::test]
async fn matrix_requests_kilometre_distances() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/matrix/driving-car"))
        .and(header("authorization", API_KEY))
        .and(body_json(serde_json::json!({
            "locations": [[8.681, 49.414], [8.687, 49.420], [8.692, 49.410]],
            "metrics": ["distance"],
            "units": "km"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "distances": [[0.0, 1.2, 2.3], [1.3, 0.0, 1.9], [2.2, 1.8, 0.0]],
            "metadata": {"service": "matrix"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let matrix = provider(&server)
        .distance_matrix(&stops())
        .await
        .expect("matrix succeeds");

    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.get(0, 1), Some(1.2));
    assert_eq!(matrix.get(1, 0), Some(1.3));
    assert_eq!(matrix.get(2, 1), Some(1.8));
}

#[tokio::test]
async fn matrix_null_cells_are_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/matrix/driving-car"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "distances": [[0.0, null, 2.3], [1.3, 0.0, 1.9], [2.2, 1.8, 0.0]]
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .distance_matrix(&stops())
        .await
        .expect_err("matrix fails");

    assert_eq!(err, RoutingError::Unreachable { from: 0, to: 1 });
}

#[tokio::test]
async fn service_error_documents_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/matrix/driving-car"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": "Access to this API has been disallowed"
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .distance_matrix(&stops())
        .await
        .expect_err("matrix fails");

    assert_eq!(
        err,
        RoutingError::ServiceError {
            code: String::new(),
            message: "Access to this API has been disallowed".to_owned()
        }
    );
}

#[tokio::test]
async fn bare_http_failures_keep_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/matrix/driving-car"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server)
        .distance_matrix(&stops())
        .await
        .expect_err("matrix fails");

    assert!(
        matches!(err, RoutingError::HttpError { status: 500, .. }),
        "expected HttpError, got {err:?}"
    );
}

#[tokio::test]
async fn slow_matrix_requests_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/matrix/driving-car"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let provider = OrsRoutingProvider::with_config(
        OrsConfig::new(server.uri()).with_timeout(Duration::from_millis(200)),
    )
    .expect("provider should build");

    let err = provider
        .distance_matrix(&stops())
        .await
        .expect_err("matrix times out");

    assert!(matches!(err, RoutingError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn directions_return_the_first_feature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .and(header("authorization", API_KEY))
        .and(body_json(serde_json::json!({
            "coordinates": [[8.681, 49.414], [8.687, 49.420], [8.692, 49.410]],
            "units": "km"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"summary": {"distance": 3.1, "duration": 420.0}},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[8.681, 49.414], [8.684, 49.417], [8.687, 49.420], [8.692, 49.410]]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geometry = provider(&server)
        .directions(&stops())
        .await
        .expect("directions succeed");

    assert_eq!(geometry.points().count(), 4);
    assert_eq!(geometry.points().next(), Some(Coord { x: 8.681, y: 49.414 }));
    assert_eq!(geometry.distance_km, Some(3.1));
}

#[tokio::test]
async fn directions_without_features_fail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": []
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .directions(&stops())
        .await
        .expect_err("directions fail");

    assert!(matches!(err, RoutingError::ParseError { .. }), "got {err:?}");
}

#[tokio::test]
async fn single_coordinate_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider(&server)
        .directions(&[Coord { x: 8.681, y: 49.414 }])
        .await
        .expect_err("one coordinate");

    assert_eq!(err, RoutingError::TooFewCoordinates { count: 1 });
}
