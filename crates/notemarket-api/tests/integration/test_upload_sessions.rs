//! Integration tests for presigned upload-session issuance

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use notemarket_api::upload_session::request_upload_session;
use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::NoteId;

use crate::common::{mount_upload_session, setup_market_mock};

#[tokio::test]
async fn test_cover_session_uses_cover_endpoint_and_default_type() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes/note-1/cover-upload-url"))
        .and(body_partial_json(serde_json::json!({
            "contentType": "image/png",
            "fileSize": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": format!("{}/upload/cover.png", server.uri()),
            "fileKey": "notes/note-1/cover.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // no declared content type: the cover default applies
    let asset = PickedAsset::new(vec![1, 2, 3]);
    let session = request_upload_session(&client, &note_id, AssetKind::Cover, &asset)
        .await
        .unwrap();

    assert_eq!(session.file_key.as_str(), "notes/note-1/cover.png");
    assert!(session.expires_at.is_none());
    server.verify().await;
}

#[tokio::test]
async fn test_content_session_forwards_declared_type() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes/note-1/upload-url"))
        .and(body_partial_json(serde_json::json!({
            "contentType": "application/epub+zip"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": format!("{}/upload/note.epub", server.uri()),
            "fileKey": "notes/note-1/note.epub",
            "expiresAt": "2026-08-07T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let asset = PickedAsset::new(vec![0; 10]).with_content_type("application/epub+zip");
    let session = request_upload_session(&client, &note_id, AssetKind::Content, &asset)
        .await
        .unwrap();

    assert!(session.expires_at.is_some());
}

#[tokio::test]
async fn test_every_attempt_requests_a_fresh_session() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes/note-1/upload-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": format!("{}/upload/k", server.uri()),
            "fileKey": "k"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let asset = PickedAsset::new(vec![0; 4]);
    request_upload_session(&client, &note_id, AssetKind::Content, &asset)
        .await
        .unwrap();
    request_upload_session(&client, &note_id, AssetKind::Content, &asset)
        .await
        .unwrap();

    // two calls, two hits: sessions are never served from a cache
    server.verify().await;
}

#[tokio::test]
async fn test_session_failure_names_the_endpoint() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes/note-1/cover-upload-url"))
        .respond_with(
            ResponseTemplate::new(413)
                .set_body_json(serde_json::json!({"message": "File too large"})),
        )
        .mount(&server)
        .await;

    let asset = PickedAsset::new(vec![0; 4]);
    let err = request_upload_session(&client, &note_id, AssetKind::Cover, &asset)
        .await
        .unwrap_err();

    match &err {
        PublishError::SessionRequest { endpoint, reason } => {
            assert_eq!(endpoint, "/api/v1/seller/notes/note-1/cover-upload-url");
            assert_eq!(reason, "File too large");
        }
        other => panic!("expected SessionRequest, got {other:?}"),
    }
    assert!(err.to_string().contains("/cover-upload-url"));
}

#[tokio::test]
async fn test_unparsable_expiry_becomes_none() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes/note-1/upload-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": format!("{}/upload/k", server.uri()),
            "fileKey": "k",
            "expiresAt": "soon"
        })))
        .mount(&server)
        .await;

    let asset = PickedAsset::new(vec![0; 4]);
    let session = request_upload_session(&client, &note_id, AssetKind::Content, &asset)
        .await
        .unwrap();
    assert!(session.expires_at.is_none());
}

#[tokio::test]
async fn test_session_helper_mount_roundtrip() {
    let (server, client) = setup_market_mock().await;
    let note_id = NoteId::new("note-9").unwrap();
    mount_upload_session(&server, "note-9", "upload-url", "notes/note-9/file.pdf").await;

    let asset = PickedAsset::new(vec![0; 4]);
    let session = request_upload_session(&client, &note_id, AssetKind::Content, &asset)
        .await
        .unwrap();
    assert!(session.upload_url.ends_with("/upload/notes/note-9/file.pdf"));
}
