//! HTTP contract tests — driven through the router with oneshot requests,
//! no listener. The gateway runs in reference mode so nothing leaves the
//! process.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use moment_trace::api::build_router;
use moment_trace::config::AppConfig;
use moment_trace::AppState;

fn test_app() -> Router {
    build_router(AppState::new(AppConfig::reference()))
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_probe_reports_running() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn too_few_images_is_a_400() {
    let body = json!({ "images": ["a", "b", "c", "d"] });
    let response = test_app().oneshot(analyze_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("at least 5"));
}

#[tokio::test]
async fn too_many_images_is_a_400() {
    let images: Vec<String> = (0..21).map(|i| format!("img{i}")).collect();
    let response = test_app()
        .oneshot(analyze_request(json!({ "images": images })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("20"));
}

#[tokio::test]
async fn missing_or_malformed_images_field_is_a_400() {
    for body in [json!({}), json!({ "images": "not-a-list" })] {
        let response = test_app().oneshot(analyze_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }
}

#[tokio::test]
async fn non_string_image_entry_is_a_400() {
    let body = json!({ "images": ["a", "b", 3, "d", "e"] });
    let response = test_app().oneshot(analyze_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("base64"));
}

#[tokio::test]
async fn valid_batch_in_reference_mode_returns_a_flagged_report() {
    let images: Vec<String> = (0..5).map(|i| format!("ZmFrZXtpbWd9{i}")).collect();
    let response = test_app()
        .oneshot(analyze_request(json!({ "images": images })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["_notice"].is_string());
    assert!(body["data"]["profile"]["summary"].is_string());
    assert!(body["data"]["openers"].as_array().unwrap().len() >= 1);
}
