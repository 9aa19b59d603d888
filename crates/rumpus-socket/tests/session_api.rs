//! Mock-server tests for the session API client.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rumpus_core::error::{Error, ProtocolError};
use rumpus_socket::{ApiClient, ServiceUrl};

fn mock_service_url(server: &MockServer) -> ServiceUrl {
    ServiceUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

#[tokio::test]
async fn fetch_session_hydrates_token_and_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "socket-token",
            "user": {
                "handle": "kimiko",
                "user_id": "u1",
                "isSupporter": true
            }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_service_url(&server));
    let session = client.fetch_session().await.unwrap();

    assert_eq!(session.token, "socket-token");
    let user = session.user.unwrap();
    assert_eq!(user.handle.as_deref(), Some("kimiko"));
    assert!(user.is_supporter);
}

#[tokio::test]
async fn fetch_session_maps_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_service_url(&server));
    let err = client.fetch_session().await.unwrap_err();

    match err {
        Error::Protocol(ProtocolError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("unauthorized"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_session_rejects_malformed_payloads() {
    let server = MockServer::start().await;

    // No token: the session record cannot hydrate.
    Mock::given(method("GET"))
        .and(path("/api/user/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "handle": "kimiko" }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_service_url(&server));
    let err = client.fetch_session().await.unwrap_err();

    match err {
        Error::Schema(mismatch) => assert_eq!(mismatch.path().as_str(), "session.token"),
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}
