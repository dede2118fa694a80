//! Wire-level tests for the API client against a mock backend.

use fieldops_client::{ApiClient, ApiConfig, ClientError, ImageConfig, ImageUploader, Session, Settings};
use fieldops_core::{ApprovalStatus, Role, User, WorkStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(base_url: &str) -> Settings {
    Settings {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        },
        images: ImageConfig::default(),
    }
}

fn admin_session() -> Session {
    Session::new(
        "test-token",
        User {
            id: "u-admin".into(),
            name: "Admin".into(),
            role: Role::Admin,
            status: ApprovalStatus::Approved,
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn list_complaints_sends_bearer_token_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/complaints"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c-1", "clientName": "Acme", "status": "Pending"},
            {"id": "c-2", "clientName": "Beta", "status": "Completed"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    let complaints = client.list_complaints(&admin_session()).await.unwrap();

    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0].id, "c-1");
    assert_eq!(complaints[1].status, WorkStatus::Completed);
}

#[tokio::test]
async fn assign_workers_sends_full_replacement_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/complaints/c-1/assign-workers"))
        .and(body_json(json!({"worker_ids": ["u-1", "u-2", "u-3"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    let ids = vec!["u-1".to_string(), "u-2".to_string(), "u-3".to_string()];
    client
        .assign_complaint_workers(&admin_session(), "c-1", &ids)
        .await
        .unwrap();
}

#[tokio::test]
async fn backend_message_surfaces_in_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p-404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Project not found"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    let err = client
        .get_project(&admin_session(), "p-404")
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Project not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    let err = client.list_invoices(&admin_session()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn approval_decision_hits_typed_route_with_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/u-9"))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    client
        .set_approval(&admin_session(), "users", "u-9", ApprovalStatus::Approved)
        .await
        .unwrap();
}

#[tokio::test]
async fn approved_user_listing_drops_pending_accounts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u-1", "name": "Pat", "role": "user", "status": "approved"},
            {"id": "u-2", "name": "Kim", "role": "user", "status": "pending"},
            {"id": "u-3", "name": "Ola", "role": "head", "status": "approved"}
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings(&server.uri())).unwrap();
    let approved = client.list_approved_users(&admin_session()).await.unwrap();

    let ids: Vec<&str> = approved.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u-1", "u-3"]);
}

#[tokio::test]
async fn update_project_validates_before_sending() {
    let server = MockServer::start().await;
    // No mock mounted: a request reaching the server would 404 and the
    // test would fail with an Api error instead of a Domain error.
    let client = ApiClient::new(&settings(&server.uri())).unwrap();

    let blank = fieldops_core::Project::default();
    let err = client
        .update_project(&admin_session(), &blank)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Domain(_)));
}

#[tokio::test]
async fn image_upload_consumes_secure_url_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://img.example/v1/site.jpg",
            "public_id": "ignored",
            "bytes": 12345
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = ImageUploader::new(ImageConfig {
        upload_url: format!("{}/upload", server.uri()),
        upload_preset: "fieldops".into(),
        ..ImageConfig::default()
    })
    .unwrap();

    let url = uploader
        .upload(vec![0xFF, 0xD8, 0xFF, 0xD9], "site.jpg")
        .await
        .unwrap();
    assert_eq!(url, "https://img.example/v1/site.jpg");
}

#[tokio::test]
async fn failed_upload_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uploader = ImageUploader::new(ImageConfig {
        upload_url: format!("{}/upload", server.uri()),
        upload_preset: "fieldops".into(),
        ..ImageConfig::default()
    })
    .unwrap();

    let err = uploader.upload(vec![1, 2, 3], "x.jpg").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}
