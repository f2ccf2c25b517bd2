//! Integration tests for the fetch wrapper using wiremock
//!
//! These tests verify live and development serve modes against mocked
//! endpoints: success decoding, error message extraction, failure toasts,
//! and the mock fallback for unreachable servers.

use cloudhaven::api::{ApiClient, ApiError, RequestOptions, ServeMode};
use cloudhaven::notification::ToastVariant;
use cloudhaven::services::{compute, users};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, mode: ServeMode) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri()), mode).expect("valid base url")
}

/// Base URL of a local port nothing listens on
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

/// Test module for live-mode requests
mod live_tests {
    use super::*;

    /// Test successful GET request returns parsed JSON
    #[tokio::test]
    async fn test_get_success_returns_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/compute/regions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "us-west-1", "name": "US West"}])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let regions = compute::list_regions(&client).await.expect("request should succeed");

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "US West");
    }

    /// Test JSON headers and body are sent
    #[tokio::test]
    async fn test_post_sends_json_headers_and_body() {
        let server = MockServer::start().await;
        let body = json!({"name": "auditor", "description": "Reads logs", "permissions": []});

        Mock::given(method("POST"))
            .and(path("/api/users/roles"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "role-77",
                "name": "auditor",
                "description": "Reads logs",
                "permissions": [],
                "userCount": 0,
                "created": "2024-05-01"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let options = RequestOptions::post().json(&body).unwrap();
        let role: Value = client.fetch_api("/users/roles", options).await.unwrap();

        assert_eq!(role["id"], "role-77");
    }

    /// Test error message is taken from the response body
    #[tokio::test]
    async fn test_error_message_from_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/users/roles/role-02"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"message": "Role has active users"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let err = users::delete_role(&client, "role-02").await.unwrap_err();

        match &err {
            ApiError::Request { status, message } => {
                assert_eq!(status.as_u16(), 409);
                assert_eq!(message, "Role has active users");
            },
            other => panic!("unexpected error: {other:?}"),
        }

        let notifications = client.notifications();
        let manager = notifications.read().await;
        let toast = manager.current_toast().expect("toast should be raised");
        assert_eq!(toast.title, "API Error");
        assert_eq!(toast.description, "Role has active users");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    /// Test status line is used when the body has no message
    #[tokio::test]
    async fn test_error_message_from_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/compute/instances/vm-01"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let err = compute::get_instance(&client, "vm-01").await.unwrap_err();

        assert_eq!(err.to_string(), "Error: 503 Service Unavailable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    }

    /// Test 204 No Content decodes as null
    #[tokio::test]
    async fn test_no_content_is_null() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let value = client
            .fetch_value("/auth/logout", RequestOptions::post())
            .await
            .unwrap();

        assert_eq!(value, Value::Null);
    }

    /// Test malformed JSON is a decode error
    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/compute/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Live);
        let err = compute::list_instances(&client).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
    }

    /// Test unreachable server raises a connection toast
    #[tokio::test]
    async fn test_transport_failure_in_live_mode() {
        let client = ApiClient::new(&closed_port_url(), ServeMode::Live).unwrap();
        let err = compute::list_instances(&client).await.unwrap_err();

        assert!(err.is_transport_error());

        let notifications = client.notifications();
        let manager = notifications.read().await;
        assert_eq!(manager.error_count(), 1);
        assert_eq!(manager.current_toast().unwrap().title, "Connection Error");
    }
}

/// Test module for development-mode fallback
mod fallback_tests {
    use super::*;

    /// Test unreachable server falls back to mock data
    #[tokio::test]
    async fn test_unreachable_server_uses_mock_data() {
        let client = ApiClient::new(&closed_port_url(), ServeMode::Development).unwrap();
        let instances = compute::list_instances(&client).await.unwrap();

        assert_eq!(instances.len(), 5);
        assert!(!client.notifications().read().await.has_notifications());
    }

    /// Test mock errors propagate through the fallback
    #[tokio::test]
    async fn test_fallback_propagates_mock_errors() {
        let client = ApiClient::new(&closed_port_url(), ServeMode::Development).unwrap();
        let err = users::delete_role(&client, "role-01").await.unwrap_err();

        assert!(matches!(err, ApiError::RoleInUse { .. }));
        assert!(!client.notifications().read().await.has_notifications());
    }

    /// Test HTTP errors are not recovered by the fallback
    #[tokio::test]
    async fn test_http_error_does_not_fall_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/compute/instances"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Development);
        let err = compute::list_instances(&client).await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
        assert_eq!(client.notifications().read().await.error_count(), 1);
    }

    /// Test a reachable server is preferred over mock data
    #[tokio::test]
    async fn test_live_answer_preferred() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/compute/regions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, ServeMode::Development);
        let regions = compute::list_regions(&client).await.unwrap();

        assert!(regions.is_empty());
    }
}
