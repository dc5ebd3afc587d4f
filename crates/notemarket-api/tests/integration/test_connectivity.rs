//! Integration tests for the connectivity preflight

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use notemarket_api::connectivity::{ensure_storage_reachable, fetch_status};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::ports::marketplace::Preflight;

use crate::common::{mount_connectivity, setup_market_mock};

#[tokio::test]
async fn test_fetch_status_parses_payload() {
    let (server, client) = setup_market_mock().await;
    mount_connectivity(
        &server,
        serde_json::json!({
            "backendReachable": true,
            "storageEnabled": true,
            "minioReachable": true,
            "endpoint": "s3.internal:9000",
            "bucket": "notes"
        }),
    )
    .await;

    let status = fetch_status(&client).await.unwrap();
    assert!(status.minio_reachable);
    assert_eq!(status.bucket.as_deref(), Some("notes"));
}

#[tokio::test]
async fn test_fetch_status_transport_failure_is_distinct() {
    let (server, client) = setup_market_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/system/connectivity"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetch_status(&client).await.unwrap_err();
    match &err {
        PublishError::Connectivity(message) => {
            // the check itself failed; not a storage-unreachable verdict
            assert!(message.contains("Connectivity status request failed"));
            assert!(message.contains("503"));
        }
        other => panic!("expected Connectivity, got {other:?}"),
    }
}

#[tokio::test]
async fn test_preflight_skipped_for_local_api_host_without_any_request() {
    // the mock server lives on 127.0.0.1, which classifies internal
    let (server, client) = setup_market_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/system/connectivity"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = ensure_storage_reachable(&client).await.unwrap();
    assert_eq!(
        outcome,
        Preflight::SkippedLocal {
            api_host: "127.0.0.1".to_string()
        }
    );
    server.verify().await;
}

#[tokio::test]
async fn test_connectivity_endpoint_is_called_without_auth() {
    // fetch_status goes through the unauthenticated request path even when
    // a session token exists
    let (server, client) = setup_market_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/system/connectivity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "minioReachable": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = fetch_status(&client).await.unwrap();
    assert!(status.minio_reachable);

    let received = server.received_requests().await.unwrap();
    assert!(received
        .iter()
        .all(|request| !request.headers.contains_key("authorization")));
}
