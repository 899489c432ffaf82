#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use stack_calculator::api::rest::register_routes;
use stack_calculator::{Service, StackCalculatorConfig};
use tower::ServiceExt as _;

pub fn create_service() -> Arc<Service> {
    Arc::new(Service::new(&StackCalculatorConfig::default()))
}

pub fn create_router(service: Arc<Service>) -> Router {
    register_routes(Router::new(), service)
}

/// Send one request through the router.
///
/// Returns the status and the body as JSON: `Null` when empty, a string when
/// the body is not JSON (axum extractor rejections are plain text).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
