//! Integration tests for the file upload passthrough.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use tower::ServiceExt;
use usergate::config::Config;

const BOUNDARY: &str = "usergate-test-boundary";

struct TestApp {
    router: Router,
    upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn spawn_app() -> TestApp {
    let upload_dir = std::env::temp_dir().join(format!(
        "usergate-uploads-{}",
        uuid::Uuid::new_v4()
    ));

    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.token_secret = "upload-test-secret".to_string();
    config.server.upload_path = upload_dir.display().to_string();
    config.observability.metrics_enabled = false;

    let state = usergate::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    TestApp {
        router: usergate::api::router(state),
        upload_dir,
    }
}

fn multipart_request(field: &str, file_name: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\
         \r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_upload_then_download() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request("file", "notes.txt", "hello uploads"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["fileURL"], "/uploads/notes.txt");

    let on_disk = std::fs::read_to_string(app.upload_dir.join("notes.txt")).unwrap();
    assert_eq!(on_disk, "hello uploads");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/uploads/notes.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello uploads");
}

#[tokio::test]
async fn test_upload_strips_directories_from_file_name() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request("file", "../../escape.txt", "nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["fileURL"], "/uploads/escape.txt");
    assert!(app.upload_dir.join("escape.txt").exists());
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request("attachment", "notes.txt", "data"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_upload_requires_multipart_body() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
