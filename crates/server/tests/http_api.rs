//! HTTP surface tests against a stub page source.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use server::error::ErrorResponse;
use server::{build_router, NotionError, PageSource, ServerConfig, ServerState};
use std::sync::Arc;
use tower::ServiceExt;

const PAGE: &str = include_str!("../../../tests/fixtures/drone_page.json");
const PAGE_ID: &str = "1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d";

/// Serves the fixture page for [`PAGE_ID`] and a 404 for anything else.
struct FixtureSource;

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch_properties(&self, page_id: &str) -> Result<Map<String, Value>, NotionError> {
        if page_id != PAGE_ID {
            return Err(NotionError::Status {
                status: 404,
                body: r#"{"object":"error","code":"object_not_found"}"#.into(),
            });
        }
        let page: Value = serde_json::from_str(PAGE).expect("fixture parses");
        match page.get("properties") {
            Some(Value::Object(props)) => Ok(props.clone()),
            _ => Err(NotionError::MissingProperties(page_id.into())),
        }
    }
}

/// Always fails as if Notion were down.
struct FailingSource;

#[async_trait]
impl PageSource for FailingSource {
    async fn fetch_properties(&self, _page_id: &str) -> Result<Map<String, Value>, NotionError> {
        Err(NotionError::Status {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}

fn app(source: Arc<dyn PageSource>) -> Router {
    let config = ServerConfig {
        notion_token: "secret_".to_string() + &"t".repeat(50),
        header_logo_url: Some("https://cdn.example.com/header.png".into()),
        footer_logo_url: Some("https://cdn.example.com/footer.png".into()),
        ..ServerConfig::default()
    };
    let state = ServerState::with_source(config, source).expect("state");
    build_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap(), content_type)
}

fn error_code(body: &str) -> String {
    let response: ErrorResponse = serde_json::from_str(body).expect("json error body");
    assert!(!response.error.message.is_empty());
    response.error.code
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body, _) = get(app(Arc::new(FixtureSource)), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "dronereport-server");
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body, _) = get(app(Arc::new(FixtureSource)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/drone/{page_id}"));
}

#[tokio::test]
async fn drone_report_renders_html() {
    let uri = "/drone/1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d";
    let (status, html, content_type) = get(app(Arc::new(FixtureSource)), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap_or_default().starts_with("text/html"));
    assert!(html.contains("Fazenda Boa Vista"));
    assert!(html.contains("AgroDrone Serviços"));
    assert!(html.contains("João da Silva"));
    assert!(html.contains("01/05/2024 14:30:00"));
    assert!(html.contains("Galopeiro"));
    assert!(html.contains("100 ml"));
    assert!(html.contains("DJI Agras T40"));
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("https://files.example.com/papel1.jpg"));
    assert!(html.contains("https://cdn.example.com/header.png"));
    assert!(html.contains("28,0"));
    assert!(html.contains("Fazenda-Boa-Vista"));
}

#[tokio::test]
async fn unknown_page_maps_to_not_found() {
    let uri = "/drone/ffffffffffffffffffffffffffffffff";
    let (status, body, _) = get(app(Arc::new(FixtureSource)), uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn malformed_page_id_is_bad_request() {
    let (status, body, _) = get(app(Arc::new(FixtureSource)), "/drone/not-a-page").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let uri = "/drone/1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d";
    let (status, body, _) = get(app(Arc::new(FailingSource)), uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error_code(&body), "UPSTREAM_ERROR");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (status, body, _) = get(app(Arc::new(FixtureSource)), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = app(Arc::new(FixtureSource))
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-123"
    );
}
