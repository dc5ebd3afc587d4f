//! Integration tests for the direct upload executor

use std::sync::Arc;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notemarket_api::transfer::upload_to_presigned;
use notemarket_api::ApiClient;
use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::FileKey;
use notemarket_core::ports::credentials::StaticCredentials;
use notemarket_core::ports::marketplace::UploadSession;

use crate::common::{mount_presigned_put, setup_market_mock};

fn session_for(server_uri: &str, file_key: &str) -> UploadSession {
    UploadSession {
        upload_url: format!("{server_uri}/upload/{file_key}"),
        file_key: FileKey::new(file_key).unwrap(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_put_sends_payload_with_resolved_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/upload/cover.png"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri(), Arc::new(StaticCredentials::anonymous()));
    let asset = PickedAsset::new(vec![0x89, 0x50, 0x4E, 0x47]);

    upload_to_presigned(
        &client,
        &session_for(&server.uri(), "cover.png"),
        &asset,
        AssetKind::Cover,
    )
    .await
    .unwrap();

    server.verify().await;
    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, vec![0x89, 0x50, 0x4E, 0x47]);
}

#[tokio::test]
async fn test_storage_rejection_yields_status_coded_summary() {
    // exact summary format for a storage-service XML rejection
    let (server, client) = setup_market_mock().await;
    mount_presigned_put(
        &server,
        "note.pdf",
        ResponseTemplate::new(403).set_body_string(
            "<Error><Code>AccessDenied</Code><Message>Request has expired</Message></Error>",
        ),
    )
    .await;

    let asset = PickedAsset::new(vec![0x25; 16]);
    let err = upload_to_presigned(
        &client,
        &session_for(&server.uri(), "note.pdf"),
        &asset,
        AssetKind::Content,
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Upload failed (403): AccessDenied: Request has expired"
    );
    assert!(matches!(
        err,
        PublishError::StorageService { status: 403, .. }
    ));
}

#[tokio::test]
async fn test_non_xml_rejection_quotes_body() {
    let (server, client) = setup_market_mock().await;
    mount_presigned_put(
        &server,
        "note.pdf",
        ResponseTemplate::new(500).set_body_string("internal  error\npage"),
    )
    .await;

    let asset = PickedAsset::new(vec![1]);
    let err = upload_to_presigned(
        &client,
        &session_for(&server.uri(), "note.pdf"),
        &asset,
        AssetKind::Content,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Upload failed (500): internal error page");
}

#[tokio::test]
async fn test_transport_failure_names_upload_host() {
    // nothing listens on this port; the connect fails
    let client = ApiClient::with_base_url(
        "http://127.0.0.1:1",
        Arc::new(StaticCredentials::anonymous()),
    );
    let session = UploadSession {
        upload_url: "http://127.0.0.1:1/upload/k".to_string(),
        file_key: FileKey::new("k").unwrap(),
        expires_at: None,
    };

    let asset = PickedAsset::new(vec![1]);
    let err = upload_to_presigned(&client, &session, &asset, AssetKind::Content)
        .await
        .unwrap_err();

    match &err {
        PublishError::Transport { host, .. } => assert_eq!(host, "127.0.0.1"),
        other => panic!("expected Transport, got {other:?}"),
    }
    assert!(err.to_string().contains("S3_PUBLIC_ENDPOINT"));
}

#[tokio::test]
async fn test_mismatched_upload_host_is_refused_without_a_request() {
    // public API host, internal upload target
    let client = ApiClient::with_base_url(
        "https://api.example.com",
        Arc::new(StaticCredentials::new("tok")),
    );
    let session = UploadSession {
        upload_url: "http://minio:9000/notes/note-1/file.pdf?sig=x".to_string(),
        file_key: FileKey::new("notes/note-1/file.pdf").unwrap(),
        expires_at: None,
    };

    let asset = PickedAsset::new(vec![1]);
    let err = upload_to_presigned(&client, &session, &asset, AssetKind::Content)
        .await
        .unwrap_err();

    // a HostMismatch (not Transport) proves the executor refused before
    // attempting the network: `minio` would not resolve from here
    let text = err.to_string();
    assert!(matches!(err, PublishError::HostMismatch { .. }));
    assert!(text.contains("minio"));
    assert!(text.contains("api.example.com"));
}
