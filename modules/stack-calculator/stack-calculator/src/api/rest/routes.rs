//! Route registration for the stack calculator module

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use stack_calculator_sdk::StackCalculatorClientV1;

use crate::domain::Service;
use crate::local_client::StackCalculatorLocalClient;

use super::handlers;

/// Prefix of every stack calculator route.
pub const BASE_PATH: &str = "/stack-calculator/v1";

/// Register all REST routes for the stack calculator module.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `service` - Domain Service
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let client: Arc<dyn StackCalculatorClientV1> =
        Arc::new(StackCalculatorLocalClient::new(Arc::clone(&service)));

    let session = format!("{BASE_PATH}/sessions/{{session_id}}");

    router
        .route(
            &format!("{BASE_PATH}/sessions"),
            post(handlers::create_session),
        )
        .route(&format!("{session}/push"), post(handlers::push))
        .route(&format!("{session}/pop"), post(handlers::pop))
        .route(&format!("{session}/is-empty"), get(handlers::is_empty))
        .route(&format!("{session}/delay-pop"), post(handlers::delay_pop))
        .route(&format!("{session}/reduce"), post(handlers::reduce))
        .route("/health", get(handlers::health))
        .layer(Extension(client))
        .layer(Extension(service))
}
