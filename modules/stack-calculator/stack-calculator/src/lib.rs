//! Stack Calculator Module Implementation
//!
//! Maintains one independent integer stack per client session and applies
//! multi-operand reductions (min, max, gcd, lcm) to them. The public API is
//! defined in `stack-calculator-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - `domain/registry.rs` - concurrent session map (`DashMap`, no global lock)
//! - `domain/stack.rs` - per-session stack with its own mutex
//! - `domain/reduction.rs` - pure reduction functions
//! - `domain/service.rs` - request facade used by every transport
//! - `local_client.rs` - `StackCalculatorClientV1` for in-process consumers
//! - `api/rest` - axum routes, DTOs and RFC 9457 problem mapping

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use stack_calculator_sdk::{
    ReduceOperator, SessionId, StackCalculatorClientV1, StackCalculatorError,
};

// === CONFIGURATION ===
pub mod config;
pub use config::StackCalculatorConfig;

// === LOCAL CLIENT ===
pub mod local_client;
pub use local_client::StackCalculatorLocalClient;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;

pub use domain::Service;
