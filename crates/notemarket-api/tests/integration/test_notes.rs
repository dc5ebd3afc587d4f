//! Integration tests for note metadata creation and the seller listing

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notemarket_api::notes;
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::newtypes::NicheId;
use notemarket_core::ports::marketplace::CreateNotePayload;

use crate::common::{mount_create_note, mount_seller_listing, setup_market_mock};

fn payload() -> CreateNotePayload {
    CreateNotePayload {
        title: "Intro to X".to_string(),
        description: None,
        price: 9.99,
        tags: vec!["api".to_string()],
        niche_id: NicheId::new("n1").unwrap(),
        course_id: None,
    }
}

#[tokio::test]
async fn test_create_note_returns_assigned_id() {
    let (server, client) = setup_market_mock().await;
    mount_create_note(&server, "note-1").await;

    let note_id = notes::create_note(&client, &payload()).await.unwrap();
    assert_eq!(note_id.as_str(), "note-1");
}

#[tokio::test]
async fn test_create_note_sends_bearer_token_and_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes"))
        .and(header("authorization", "Bearer test-access-token"))
        .and(body_partial_json(serde_json::json!({
            "title": "Intro to X",
            "nicheId": "n1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "note-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = notemarket_api::ApiClient::with_base_url(
        server.uri(),
        std::sync::Arc::new(notemarket_core::ports::credentials::StaticCredentials::new(
            "test-access-token",
        )),
    );

    notes::create_note(&client, &payload()).await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_create_note_surfaces_backend_message() {
    let (server, client) = setup_market_mock().await;
    wiremock::Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"message": "Niche not found"})),
        )
        .mount(&server)
        .await;

    let err = notes::create_note(&client, &payload()).await.unwrap_err();
    assert_eq!(err, PublishError::Api("Niche not found".to_string()));
}

#[tokio::test]
async fn test_create_note_without_id_is_an_error() {
    let (server, client) = setup_market_mock().await;
    wiremock::Mock::given(method("POST"))
        .and(path("/api/v1/seller/notes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = notes::create_note(&client, &payload()).await.unwrap_err();
    assert!(err
        .to_string()
        .contains("no note ID was returned"));
}

#[tokio::test]
async fn test_list_seller_notes_page_object() {
    let (server, client) = setup_market_mock().await;
    mount_seller_listing(
        &server,
        serde_json::json!([
            {"id": "note-1", "title": "Intro to X", "price": 9.99, "tags": ["api"]},
            {"id": "note-2", "title": "Untitled draft"}
        ]),
    )
    .await;

    let listing = notes::list_seller_notes(&client).await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].title.as_deref(), Some("Intro to X"));
    assert_eq!(listing[1].price, None);
}

#[tokio::test]
async fn test_list_seller_notes_bare_array() {
    let (server, client) = setup_market_mock().await;
    wiremock::Mock::given(method("GET"))
        .and(path("/api/v1/seller/notes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "note-1", "title": "Algebra"}])),
        )
        .mount(&server)
        .await;

    let listing = notes::list_seller_notes(&client).await.unwrap();
    assert_eq!(listing.len(), 1);
}
