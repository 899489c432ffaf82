//! Domain service for the stack calculator
//!
//! Request facade shared by every transport: validates input, resolves the
//! session's stack and applies the operation under that stack's lock.

use std::time::Duration;

use stack_calculator_sdk::{ReduceOperator, SessionId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::error::DomainError;
use super::reduction;
use super::registry::SessionRegistry;
use crate::config::StackCalculatorConfig;

/// Stack calculator service.
///
/// The registry and the individual stacks are its only mutable state; there
/// is no service-wide lock.
#[derive(Debug)]
pub struct Service {
    registry: SessionRegistry,
    shutdown: CancellationToken,
}

impl Default for Service {
    fn default() -> Self {
        Self::new(&StackCalculatorConfig::default())
    }
}

impl Service {
    #[must_use]
    pub fn new(config: &StackCalculatorConfig) -> Self {
        Self::with_registry(SessionRegistry::new(
            config.initial_sessions_capacity,
            config.stack_capacity,
        ))
    }

    #[must_use]
    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            registry,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn create_session(&self) -> SessionId {
        let session_id = self.registry.create_session();
        info!(session_id = %session_id, sessions = self.registry.len(), "New session created");
        session_id
    }

    /// # Errors
    /// [`DomainError::UnknownSession`] if the session does not exist.
    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    pub fn push(&self, session_id: &SessionId, value: i32) -> Result<(), DomainError> {
        self.registry.resolve(session_id)?.push(value);
        debug!("Pushed value");
        Ok(())
    }

    /// # Errors
    /// [`DomainError::UnknownSession`], [`DomainError::EmptyStack`].
    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    pub fn pop(&self, session_id: &SessionId) -> Result<i32, DomainError> {
        let value = self.registry.resolve(session_id)?.pop()?;
        debug!(value, "Popped value");
        Ok(value)
    }

    /// # Errors
    /// [`DomainError::UnknownSession`] if the session does not exist.
    pub fn is_empty(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.registry.resolve(session_id)?.is_empty())
    }

    /// Wait for `delay`, then pop.
    ///
    /// The session is resolved before waiting. Only this request waits:
    /// neither the stack's lock nor anything shared is held during the delay.
    ///
    /// # Errors
    /// [`DomainError::UnknownSession`], [`DomainError::EmptyStack`], or
    /// [`DomainError::Interrupted`] if [`Service::shutdown`] is called while
    /// waiting.
    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    pub async fn delay_pop(
        &self,
        session_id: &SessionId,
        delay: Duration,
    ) -> Result<i32, DomainError> {
        let stack = self.registry.resolve(session_id)?;
        let value = stack.delay_pop(delay, &self.shutdown).await?;
        debug!(value, "Popped value after delay");
        Ok(value)
    }

    /// Replace the session's stack with `operator` applied to all its values.
    ///
    /// On any failure the stack is exactly as it was before the call.
    ///
    /// # Errors
    /// [`DomainError::InvalidOperator`] (checked first),
    /// [`DomainError::UnknownSession`], [`DomainError::EmptyStack`],
    /// [`DomainError::ResultOverflow`].
    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    pub fn reduce(&self, session_id: &SessionId, operator: &str) -> Result<i32, DomainError> {
        let operator: ReduceOperator = operator
            .parse()
            .map_err(|_| DomainError::InvalidOperator(operator.to_owned()))?;
        let stack = self.registry.resolve(session_id)?;

        let result = stack.reduce_with(|values| {
            reduction::apply(operator, values).map_err(|e| DomainError::from_reduction(operator, e))
        })?;

        debug!(%operator, result, "Reduction completed");
        Ok(result)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Interrupt every pending and future [`Service::delay_pop`].
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            info!("Stack calculator shutting down; interrupting delayed pops");
        }
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(service: &Service, values: &[i32]) -> SessionId {
        let id = service.create_session();
        for v in values {
            service.push(&id, *v).unwrap();
        }
        id
    }

    #[test]
    fn test_reduce_examples() {
        let service = Service::default();
        let cases: [(&str, &[i32], i32); 4] = [
            ("gcd", &[12, 18, 24], 6),
            ("lcm", &[4, 6], 12),
            ("min", &[15, 5, 25, 10], 5),
            ("max", &[15, 5, 25, 10], 25),
        ];
        for (op, values, expected) in cases {
            let id = session_with(&service, values);
            assert_eq!(service.reduce(&id, op), Ok(expected), "operator {op}");
            assert_eq!(service.pop(&id), Ok(expected));
            assert_eq!(service.is_empty(&id), Ok(true));
        }
    }

    #[test]
    fn test_reduce_invalid_operator_leaves_stack() {
        let service = Service::default();
        let id = session_with(&service, &[3, 1, 2]);
        assert_eq!(
            service.reduce(&id, "avg"),
            Err(DomainError::InvalidOperator("avg".to_owned()))
        );
        assert_eq!(service.pop(&id), Ok(2));
        assert_eq!(service.pop(&id), Ok(1));
        assert_eq!(service.pop(&id), Ok(3));
    }

    #[test]
    fn test_invalid_operator_reported_before_unknown_session() {
        let service = Service::default();
        let missing = SessionId::from("missing");
        assert_eq!(
            service.reduce(&missing, "sum"),
            Err(DomainError::InvalidOperator("sum".to_owned()))
        );
        assert_eq!(
            service.reduce(&missing, "min"),
            Err(DomainError::UnknownSession(missing))
        );
    }

    #[test]
    fn test_reduce_empty_stack() {
        let service = Service::default();
        let id = service.create_session();
        assert_eq!(service.reduce(&id, "max"), Err(DomainError::EmptyStack));
        assert_eq!(service.is_empty(&id), Ok(true));
    }

    #[test]
    fn test_reduce_overflow_rolls_back() {
        let service = Service::default();
        let id = session_with(&service, &[65_536, 7, 65_537]);
        assert_eq!(
            service.reduce(&id, "lcm"),
            Err(DomainError::ResultOverflow {
                operator: ReduceOperator::Lcm,
            })
        );
        assert_eq!(service.pop(&id), Ok(65_537));
        assert_eq!(service.pop(&id), Ok(7));
        assert_eq!(service.pop(&id), Ok(65_536));
        assert_eq!(service.is_empty(&id), Ok(true));
    }

    #[test]
    fn test_unknown_session_everywhere() {
        let service = Service::default();
        let missing = SessionId::from("missing");
        let unknown = DomainError::UnknownSession(missing.clone());
        assert_eq!(service.push(&missing, 1), Err(unknown.clone()));
        assert_eq!(service.pop(&missing), Err(unknown.clone()));
        assert_eq!(service.is_empty(&missing), Err(unknown.clone()));
        assert_eq!(service.reduce(&missing, "gcd"), Err(unknown));
    }

    #[tokio::test]
    async fn test_delay_pop_unknown_session_fails_without_waiting() {
        let service = Service::default();
        let start = std::time::Instant::now();
        let result = service
            .delay_pop(&SessionId::from("missing"), Duration::from_secs(10))
            .await;
        assert!(matches!(result, Err(DomainError::UnknownSession(_))));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_delay_pop() {
        let service = std::sync::Arc::new(Service::default());
        let id = session_with(&service, &[8]);

        let waiter = {
            let service = std::sync::Arc::clone(&service);
            let id = id.clone();
            tokio::spawn(async move { service.delay_pop(&id, Duration::from_secs(30)).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        service.shutdown();

        assert_eq!(waiter.await.unwrap(), Err(DomainError::Interrupted));
        assert_eq!(service.pop(&id), Ok(8));
    }
}
