//! REST binding for the stack calculator.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::Problem;
pub use routes::{BASE_PATH, register_routes};
