#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use madlib_service::config::{MadlibConfig, ModelConfig, OpenAiConfig};
use madlib_service::services::providers::{ImageProvider, TextProvider};
use madlib_service::startup::build_router;
use madlib_service::AppState;
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "sk-test";

pub fn test_config(api_key: Option<&str>, base_url: &str) -> MadlibConfig {
    MadlibConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Config::default()
        },
        openai: OpenAiConfig::new(api_key, base_url),
        models: ModelConfig::default(),
    }
}

/// Router wired to the given providers, with or without a credential.
pub fn router_with(
    api_key: Option<&str>,
    text: Arc<dyn TextProvider>,
    image: Arc<dyn ImageProvider>,
) -> Router {
    let config = test_config(api_key, "http://upstream.invalid");
    build_router(AppState::new(config, text, image))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

pub async fn send(app: Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
