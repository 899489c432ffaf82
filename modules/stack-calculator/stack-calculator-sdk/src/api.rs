//! Stack Calculator API trait
//!
//! Contract trait for the stack calculator service.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StackCalculatorError;
use crate::models::SessionId;

/// Stack Calculator API trait
///
/// Every operation names its session explicitly. Implementations hold no
/// per-thread or per-connection notion of a "current" session.
#[async_trait]
pub trait StackCalculatorClientV1: Send + Sync {
    /// Create a new session with an empty stack and return its identifier.
    ///
    /// # Errors
    /// Only transport-level failures; the local implementation never fails.
    async fn create_session(&self) -> Result<SessionId, StackCalculatorError>;

    /// Push a value onto the session's stack.
    ///
    /// # Errors
    /// `UnknownSession`.
    async fn push(&self, session_id: &SessionId, value: i32) -> Result<(), StackCalculatorError>;

    /// Remove and return the top of the session's stack.
    ///
    /// # Errors
    /// `UnknownSession`, `EmptyStack`.
    async fn pop(&self, session_id: &SessionId) -> Result<i32, StackCalculatorError>;

    /// Report whether the session's stack has no elements.
    ///
    /// # Errors
    /// `UnknownSession`.
    async fn is_empty(&self, session_id: &SessionId) -> Result<bool, StackCalculatorError>;

    /// Wait for `delay`, then pop. Only the calling request waits.
    ///
    /// # Errors
    /// `UnknownSession` (before waiting), `EmptyStack`, or `Interrupted` if
    /// the service shuts down during the wait.
    async fn delay_pop(
        &self,
        session_id: &SessionId,
        delay: Duration,
    ) -> Result<i32, StackCalculatorError>;

    /// Replace the whole stack with `operator` applied to its values.
    ///
    /// The result is left on top of the stack. On any error the stack is
    /// unchanged.
    ///
    /// # Errors
    /// `InvalidOperator`, `UnknownSession`, `EmptyStack`, `ResultOverflow`.
    async fn reduce(
        &self,
        session_id: &SessionId,
        operator: &str,
    ) -> Result<(), StackCalculatorError>;
}
