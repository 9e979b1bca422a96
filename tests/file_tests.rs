//! Integration tests for file upload and visibility.

mod mocks;

use hubspot_dealflow::models::FileAccess;
use hubspot_dealflow::{Config, ConfigError, FileUploadOptions, HubspotClient, HubspotError};
use mocks::RecordingTransport;
use mockito::{Matcher, Server};
use std::sync::Arc;

fn portal_config() -> Config {
    Config {
        portal_id: Some("123".to_string()),
        ..Config::new("api_key")
    }
}

#[test]
fn test_upload_file() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/files/v3/files")
        .match_query(Matcher::UrlEncoded("hapikey".into(), "api_key".into()))
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="pitch.pdf""#.into()),
            Matcher::Regex("deck contents".into()),
            Matcher::Regex(r#"name="folderPath""#.into()),
            Matcher::Regex("/applications/app-1".into()),
            Matcher::Regex(r#""access":"PRIVATE""#.into()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "f9", "name": "pitch", "url": "https://cdn.example.com/pitch.pdf"}"#)
        .create();

    let client = HubspotClient::with_base_url(server.url(), portal_config());
    let url = client
        .upload_file(b"deck contents", "/applications/app-1", "pitch.pdf")
        .unwrap();

    mock.assert();
    assert_eq!(url, format!("{}/file-preview/123/file/f9", server.url()));
    assert_eq!(client.metrics().files_uploaded_total(), 1);
}

#[test]
fn test_upload_file_with_options() {
    let transport = RecordingTransport::new().respond(201, r#"{"id": "f9"}"#);
    let client = HubspotClient::with_transport(portal_config(), Arc::new(transport.clone()));

    let options = FileUploadOptions {
        access: FileAccess::PublicNotIndexable,
        overwrite: false,
        ..FileUploadOptions::default()
    };
    let url = client
        .upload_file_with_options(b"x", "/docs", "a.txt", &options)
        .unwrap();

    assert_eq!(url, "https://app.hubspot.com/file-preview/123/file/f9");

    let request = &transport.requests()[0];
    let body = String::from_utf8_lossy(request.body.as_deref().unwrap()).to_string();
    assert!(body.contains(r#""access":"PUBLIC_NOT_INDEXABLE""#));
    assert!(body.contains(r#""overwrite":false"#));
}

#[test]
fn test_upload_file_requires_created_status() {
    let mut server = Server::new();

    server
        .mock("POST", "/files/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "f9"}"#)
        .create();

    let client = HubspotClient::with_base_url(server.url(), portal_config());
    let err = client
        .upload_file(b"deck contents", "/applications/app-1", "pitch.pdf")
        .unwrap_err();

    assert!(matches!(
        err,
        HubspotError::UpstreamStatus { status: 200, .. }
    ));
    assert_eq!(client.metrics().files_uploaded_total(), 0);
}

#[test]
fn test_upload_file_rejected() {
    let transport = RecordingTransport::new().respond(413, "Payload Too Large");
    let client = HubspotClient::with_transport(portal_config(), Arc::new(transport));

    let err = client.upload_file(b"x", "/docs", "a.txt").unwrap_err();

    match err {
        HubspotError::UpstreamStatus { status, body } => {
            assert_eq!(status, 413);
            assert_eq!(body, "Payload Too Large");
        }
        other => panic!("Expected UpstreamStatus, got: {:?}", other),
    }
}

#[test]
fn test_upload_file_requires_portal_id() {
    let transport = RecordingTransport::new();
    let client = HubspotClient::with_transport(Config::new("api_key"), Arc::new(transport.clone()));

    let err = client.upload_file(b"x", "/docs", "a.txt").unwrap_err();

    assert!(matches!(
        err,
        HubspotError::Configuration(ConfigError::MissingVar(ref var)) if var == "HUBSPOT_PORTAL_ID"
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_make_file_public() {
    let mut server = Server::new();

    let mock = server
        .mock("PATCH", "/files/v3/files/f9")
        .match_query(Matcher::UrlEncoded("hapikey".into(), "api_key".into()))
        .match_body(Matcher::Json(serde_json::json!({"access": "PUBLIC_NOT_INDEXABLE"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "id": "f9",
            "access": "PUBLIC_NOT_INDEXABLE",
            "url": "https://cdn.example.com/pitch.pdf"
        }"#,
        )
        .create();

    let client = HubspotClient::with_base_url(server.url(), Config::new("api_key"));
    let url = client.make_file_public("f9").unwrap();

    mock.assert();
    assert_eq!(url, "https://cdn.example.com/pitch.pdf");
}

#[test]
fn test_make_file_public_without_url() {
    let transport = RecordingTransport::new().respond(200, r#"{"id": "f9"}"#);
    let client = HubspotClient::with_transport(Config::new("api_key"), Arc::new(transport));

    let err = client.make_file_public("f9").unwrap_err();

    assert!(matches!(err, HubspotError::MissingProperty { .. }));
}

#[test]
fn test_file_preview_url() {
    let client = HubspotClient::new(portal_config());
    assert_eq!(
        client.file_preview_url("f9").unwrap(),
        "https://app.hubspot.com/file-preview/123/file/f9"
    );
}
