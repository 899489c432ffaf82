//! Stack Calculator SDK
//!
//! This crate provides everything needed to consume the stack calculator service:
//! - API trait (`StackCalculatorClientV1`)
//! - Session and operator types (`SessionId`, `ReduceOperator`)
//! - Error types (`StackCalculatorError`)
//!
//! ## Usage
//!
//! ```ignore
//! use stack_calculator_sdk::StackCalculatorClientV1;
//!
//! let session = client.create_session().await?;
//! client.push(&session, 12).await?;
//! client.push(&session, 18).await?;
//! client.reduce(&session, "gcd").await?;
//! let gcd = client.pop(&session).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT ===
mod api;
pub use api::StackCalculatorClientV1;

// === ERRORS ===
mod error;
pub use error::StackCalculatorError;

// === MODELS ===
pub mod models;
pub use models::{ReduceOperator, SessionId};
