//! File API integration tests.
//!
//! Run with: `cargo test -p stowage-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, setup_test_app};

async fn upload(app: &helpers::TestApp, file_name: &str, data: &[u8]) -> axum_test::TestResponse {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(file_name.to_string())
        .mime_type("application/octet-stream");
    let multipart = MultipartForm::new().add_part("file", part);
    app.client()
        .post(&api_path("/files"))
        .multipart(multipart)
        .await
}

#[tokio::test]
async fn test_list_files_empty_initially() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/files")).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["container"], "samples");
    assert_eq!(body["files"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_list_download_round_trip() {
    let app = setup_test_app().await;
    let data = b"hello object storage";

    let response = upload(&app, "hello.bin", data).await;
    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["file_name"], "hello.bin");
    assert_eq!(body["container"], "samples");

    let response = app.client().get(&api_path("/files")).await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["files"]
        .as_array()
        .unwrap()
        .iter()
        .any(|name| name == "hello.bin"));

    let response = app.client().get(&api_path("/files/hello.bin")).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), data);
    let disposition = response.header("content-disposition");
    assert!(disposition
        .to_str()
        .unwrap()
        .contains("filename=\"hello.bin\""));
}

#[tokio::test]
async fn test_reupload_overwrites() {
    let app = setup_test_app().await;

    assert_eq!(
        upload(&app, "note.txt", b"first version").await.status_code(),
        201
    );
    assert_eq!(
        upload(&app, "note.txt", b"second version").await.status_code(),
        201
    );

    let response = app.client().get(&api_path("/files/note.txt")).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), b"second version");

    // Overwriting must not duplicate the listing entry
    let response = app.client().get(&api_path("/files")).await;
    let body: serde_json::Value = response.json();
    let matches = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|name| *name == "note.txt")
        .count();
    assert_eq!(matches, 1);
}

#[tokio::test]
async fn test_upload_without_file_field_rejected() {
    let app = setup_test_app().await;

    // A form field without a filename is not a file upload
    let multipart = MultipartForm::new().add_text("comment", "just text");
    let response = app
        .client()
        .post(&api_path("/files"))
        .multipart(multipart)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_download_missing_blob_returns_404() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/files/never-uploaded.txt"))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_save_text_appends_extension_and_round_trips() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/text"))
        .json(&serde_json::json!({
            "file_name": "greeting",
            "content": "hello world"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["file_name"], "greeting.txt");

    let response = app.client().get(&api_path("/files/greeting.txt")).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "hello world");
}

#[tokio::test]
async fn test_save_text_keeps_existing_extension() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/text"))
        .json(&serde_json::json!({
            "file_name": "notes.txt",
            "content": "already named"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["file_name"], "notes.txt");
}

#[tokio::test]
async fn test_save_text_empty_input_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/text"))
        .json(&serde_json::json!({ "file_name": "", "content": "x" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .client()
        .post(&api_path("/text"))
        .json(&serde_json::json!({ "file_name": "x", "content": "" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_concurrent_uploads_distinct_names() {
    let app = setup_test_app().await;

    let (a, b, c) = tokio::join!(
        upload(&app, "one.bin", b"one"),
        upload(&app, "two.bin", b"two"),
        upload(&app, "three.bin", b"three"),
    );
    assert_eq!(a.status_code(), 201);
    assert_eq!(b.status_code(), 201);
    assert_eq!(c.status_code(), 201);

    for (name, content) in [
        ("one.bin", b"one" as &[u8]),
        ("two.bin", b"two"),
        ("three.bin", b"three"),
    ] {
        let response = app
            .client()
            .get(&api_path(&format!("/files/{}", name)))
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.as_bytes().as_ref(), content);
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/live").await;
    assert_eq!(response.status_code(), 200);

    // The default container does not exist yet; health treats that as fine
    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}
