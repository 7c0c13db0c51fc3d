// File: crates/plot-server/tests/http.rs
// Purpose: Drive the axum router in-process: status codes, JSON shapes, CORS and cache headers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use plot_server::{router, Config};
use serde_json::Value;
use tower::ServiceExt;

fn app_with(config: Config) -> axum::Router {
    router(Arc::new(config))
}

fn app() -> axum::Router {
    let mut config = Config::default();
    config.image.width = 320;
    config.image.height = 200;
    app_with(config)
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/plot")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

#[tokio::test]
async fn post_sine_returns_image() {
    let body = r#"{"expression":"sin(x)","xMin":0,"xMax":6.283185,"samples":100}"#;
    let (status, headers, json) = send(app(), post(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    assert_eq!(json["contentType"], "image/png");
    assert_eq!(json["default"], false);
    assert_eq!(json["metadata"]["samples"], 100);
    assert!(!json["image"].as_str().unwrap().is_empty());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn get_renders_default_plot() {
    let req = Request::builder().uri("/api/plot").body(Body::empty()).unwrap();
    let (status, _, json) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["default"], true);
    assert_eq!(json["metadata"]["samples"], 500);
}

#[tokio::test]
async fn empty_post_uses_defaults() {
    let (status, _, json) = send(app(), post(Body::empty())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["default"], false);
}

#[tokio::test]
async fn validation_error_is_400() {
    let body = r#"{"expression":"__import__('os').system('ls')"}"#;
    let (status, headers, json) = send(app(), post(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    assert_eq!(json["kind"], "validation");
    assert!(json.get("image").is_none());
}

#[tokio::test]
async fn evaluation_error_is_400() {
    let (status, _, json) = send(app(), post(r#"{"expression":"sin(x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "evaluation");
}

#[tokio::test]
async fn nothing_finite_is_422() {
    let body = r#"{"expression":"sqrt(x)","xMin":-2,"xMax":-1}"#;
    let (status, _, json) = send(app(), post(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "render");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (status, _, json) = send(app(), post("{\"expression\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let mut config = Config::default();
    config.server.max_body_bytes = 64;
    let body = format!(r#"{{"expression":"{}x"}}"#, "x+".repeat(100));
    let (status, _, json) = send(app_with(config), post(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["kind"], "payload");
}

#[tokio::test]
async fn cors_preflight() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/plot")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(app(), req).await;
    assert!(status.is_success());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST") && methods.contains("GET"));
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn plain_options_is_ok() {
    let req = Request::builder().method(Method::OPTIONS).uri("/api/plot").body(Body::empty()).unwrap();
    let (status, _, json) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));
}
