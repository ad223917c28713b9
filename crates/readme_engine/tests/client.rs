use std::time::Duration;

use pretty_assertions::assert_eq;
use readme_engine::{
    ClientSettings, Envelope, GeneratedReadme, HealthStatus, HttpReadmeApi, PreviewHtml,
    ReadmeApi, RepositoryAnalysis,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "https://github.com/facebook/react";

fn api_for(server: &MockServer) -> HttpReadmeApi {
    HttpReadmeApi::new(ClientSettings {
        base_url: format!("{}/api", server.uri()),
        ..ClientSettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn analyze_posts_json_and_decodes_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "github_url": REPO })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "name": "react",
            "description": "UI library",
            "language": "JavaScript",
            "stars": 220000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = api_for(&server).analyze(REPO).await;

    assert_eq!(
        envelope,
        Envelope::Success(RepositoryAnalysis {
            name: Some("react".to_string()),
            description: Some("UI library".to_string()),
            language: Some("JavaScript".to_string()),
            stars: Some(220_000),
        })
    );
}

#[tokio::test]
async fn generate_returns_markdown_and_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-readme"))
        .and(body_json(json!({ "github_url": REPO })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": "# React",
            "html": "<h1>React</h1>",
            "message": "generated"
        })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).generate(REPO).await;

    assert_eq!(
        envelope,
        Envelope::Success(GeneratedReadme {
            markdown: Some("# React".to_string()),
            html: Some("<h1>React</h1>".to_string()),
            message: Some("generated".to_string()),
        })
    );
}

#[tokio::test]
async fn declared_failure_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-readme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Repository not found"
        })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).generate(REPO).await;

    assert_eq!(envelope.error(), Some("Repository not found"));
}

#[tokio::test]
async fn declared_failure_survives_mistyped_payload_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Repository not found",
            "stars": "n/a"
        })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).analyze(REPO).await;

    assert_eq!(envelope, Envelope::failure("Repository not found"));
}

#[tokio::test]
async fn declared_failure_without_text_keeps_error_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-readme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).generate(REPO).await;

    assert_eq!(envelope, Envelope::Failure { error: None });
}

#[tokio::test]
async fn non_success_status_becomes_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).analyze(REPO).await;

    assert_eq!(envelope, Envelope::failure("HTTP error! status: 500"));
}

#[tokio::test]
async fn malformed_body_becomes_failure_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let envelope = api_for(&server).preview("# hi").await;

    assert!(!envelope.is_success());
    assert!(envelope
        .error()
        .unwrap()
        .starts_with("invalid response body"));
}

#[tokio::test]
async fn preview_sends_content_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/preview"))
        .and(body_json(json!({ "content": "# Title" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "html": "<h1>Title</h1>"
        })))
        .mount(&server)
        .await;

    let envelope = api_for(&server).preview("# Title").await;

    assert_eq!(
        envelope,
        Envelope::Success(PreviewHtml {
            html: Some("<h1>Title</h1>".to_string()),
        })
    );
}

#[tokio::test]
async fn slow_backend_times_out_into_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-readme"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "success": true })),
        )
        .mount(&server)
        .await;

    let api = HttpReadmeApi::new(ClientSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .unwrap();

    let envelope = api.generate(REPO).await;

    assert!(envelope.error().unwrap().starts_with("request timed out"));
}

#[tokio::test]
async fn unreachable_backend_becomes_failure_envelope() {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    drop(server);

    let api = HttpReadmeApi::new(ClientSettings {
        base_url: base,
        ..ClientSettings::default()
    })
    .unwrap();

    let envelope = api.analyze(REPO).await;

    assert!(!envelope.is_success());
    assert!(envelope.error().is_some());
}

#[tokio::test]
async fn health_reports_server_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = api_for(&server).health().await;

    assert_eq!(
        status,
        HealthStatus {
            status: "healthy".to_string()
        }
    );
}

#[tokio::test]
async fn health_degrades_on_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let status = api_for(&server).health().await;

    assert!(status.is_degraded());
    assert_eq!(status, HealthStatus::degraded());
}
