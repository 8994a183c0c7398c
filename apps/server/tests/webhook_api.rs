//! Router-level tests: health probe and webhook flow over an in-memory
//! directory standing in for the IntakeQ transport.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bridge_core::directory::{ClientDirectory, ClientMatch};
use bridge_core::models::{ClientId, ClientRecord};
use bridge_core::Result;
use intake_bridge::api::create_router;
use intake_bridge::config::{Config, IntakeQConfig, LoggingConfig, ServerConfig, SyncConfig};
use intake_bridge::state::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Minimal in-memory directory: stores created clients, matches by email.
#[derive(Default)]
struct StubDirectory {
    clients: Mutex<Vec<(i64, String, ClientRecord)>>,
}

#[async_trait]
impl ClientDirectory for StubDirectory {
    async fn search_by_email(&self, email: &str) -> Result<Vec<ClientMatch>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, stored, _)| stored == email)
            .map(|(id, _, _)| ClientMatch {
                client_id: Some(ClientId::Number(*id)),
            })
            .collect())
    }

    async fn create_client(&self, record: &ClientRecord) -> Result<ClientMatch> {
        let mut clients = self.clients.lock().unwrap();
        let id = clients.len() as i64 + 1;
        clients.push((id, record.email.to_lowercase(), record.clone()));
        Ok(ClientMatch {
            client_id: Some(ClientId::Number(id)),
        })
    }

    async fn update_client(&self, id: &ClientId, record: &ClientRecord) -> Result<ClientMatch> {
        let mut clients = self.clients.lock().unwrap();
        if let Some(slot) = clients
            .iter_mut()
            .find(|(stored, _, _)| ClientId::Number(*stored) == *id)
        {
            slot.2 = record.clone();
        }
        Ok(ClientMatch {
            client_id: Some(id.clone()),
        })
    }

    async fn attach_tag(&self, _id: &ClientId, _tag: &str) -> Result<()> {
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_request_body_size: 1024 * 1024,
        },
        intakeq: IntakeQConfig {
            api_key: "test-key".to_string(),
            base_url: "http://localhost:0".to_string(),
            timeout_seconds: 5,
        },
        sync: SyncConfig::default(),
        logging: LoggingConfig {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "app.log".to_string(),
        },
    }
}

fn test_app() -> Router {
    let state = AppState::with_directory(test_config(), Arc::new(StubDirectory::default()));
    create_router(state)
}

async fn send_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_check_answers_healthy() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn unpaid_webhook_is_ignored_with_200() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "/webhook/gohighlevel",
        json!({"contact_id": "c1", "tags": "new"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["reason"], "Not a paid tag");
}

#[tokio::test]
async fn paid_webhook_upserts_and_reports_success() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "/webhook/gohighlevel",
        json!({
            "tags": "new,paid",
            "contact_id": "c1",
            "first_name": "A",
            "last_name": "B",
            "email": "a@b.com",
            "phone": "555",
            "Height Feet": "5",
            "Height Inches": "7",
            "Current Weight?": "150"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["gohighlevel_contact_id"], "c1");
    assert_eq!(body["intakeq_client_id"], 1);
    assert_eq!(body["glp1_fields_mapped"], 0);
}

#[tokio::test]
async fn paid_webhook_without_email_maps_to_failed_request() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "/webhook/gohighlevel",
        json!({"contact_id": "c1", "tags": "paid"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["reason"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/webhook/gohighlevel")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}
