//! Domain layer for the stack calculator module.
//!
//! Contains the session registry, per-session stacks, reduction functions
//! and the service facade.

pub mod error;
pub mod reduction;
pub mod registry;
pub mod service;
pub mod stack;

pub use error::DomainError;
pub use registry::SessionRegistry;
pub use service::Service;
pub use stack::SessionStack;
