#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use nudge_api::config::{NudgeStoreKind, ObjectStoreKind, ServerConfig};
use nudge_api::router::build_app_router;
use nudge_api::state::AppState;
use nudge_db::MemoryNudgeStore;
use nudge_store::LocalDiskStore;

/// Build a test `ServerConfig` with safe defaults, pointing the local
/// object store at `upload_dir`.
pub fn test_config(upload_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        nudge_store: NudgeStoreKind::Memory,
        object_store: ObjectStoreKind::Local,
        upload_dir: upload_dir.to_string(),
        s3_bucket: None,
        s3_prefix: "nudges".to_string(),
        s3_public_url: None,
    }
}

/// Build the full application router with all middleware layers, backed
/// by the in-memory nudge store and a tempdir-backed local object store.
///
/// The returned `TempDir` must be kept alive for as long as the router
/// is used; dropping it removes the upload directory.
pub fn build_test_app() -> (Router, tempfile::TempDir) {
    let uploads = tempfile::tempdir().expect("failed to create upload tempdir");
    let config = test_config(uploads.path().to_str().unwrap());

    let state = AppState {
        nudges: Arc::new(MemoryNudgeStore::new()),
        objects: Arc::new(LocalDiskStore::new(uploads.path())),
    };

    (build_app_router(state, &config), uploads)
}

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::put(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a DELETE request.
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Multipart boundary used by [`multipart_body`].
const BOUNDARY: &str = "nudge-test-boundary-4fa9ce01";

/// Build a `multipart/form-data` body from flat text fields plus an
/// optional file part, returning `(content_type, body)`.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Send a POST request with a multipart body built by [`multipart_body`].
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Response<Body> {
    let (content_type, body) = multipart_body(fields, file);
    app.clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    use http_body_util::BodyExt;
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// The standard create request from the test scenarios: full field set
/// plus a small file. Returns the created id.
pub async fn create_sample_nudge(app: &Router) -> String {
    let response = post_multipart(
        app,
        "/api/v3/app/nudges",
        &[
            ("tag", "promo"),
            ("title", "Sale"),
            ("date", "2024-06-01"),
            ("startTime", "10:00"),
            ("endTime", "12:00"),
            ("description", "d"),
            ("icon", "i"),
            ("invitationText", "v"),
        ],
        Some(("coverImage", "cover.png", b"fake image bytes")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["id"].as_str().expect("create must return an id").to_string()
}
