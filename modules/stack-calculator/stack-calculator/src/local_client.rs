//! Local client implementing the `StackCalculatorClientV1` trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stack_calculator_sdk::{SessionId, StackCalculatorClientV1, StackCalculatorError};

use crate::domain::Service;

/// Local client for the stack calculator module.
///
/// Delegates to the domain service and converts domain errors into the
/// SDK's public error type.
pub struct StackCalculatorLocalClient {
    service: Arc<Service>,
}

impl StackCalculatorLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl StackCalculatorClientV1 for StackCalculatorLocalClient {
    async fn create_session(&self) -> Result<SessionId, StackCalculatorError> {
        Ok(self.service.create_session())
    }

    async fn push(&self, session_id: &SessionId, value: i32) -> Result<(), StackCalculatorError> {
        self.service.push(session_id, value).map_err(Into::into)
    }

    async fn pop(&self, session_id: &SessionId) -> Result<i32, StackCalculatorError> {
        self.service.pop(session_id).map_err(Into::into)
    }

    async fn is_empty(&self, session_id: &SessionId) -> Result<bool, StackCalculatorError> {
        self.service.is_empty(session_id).map_err(Into::into)
    }

    async fn delay_pop(
        &self,
        session_id: &SessionId,
        delay: Duration,
    ) -> Result<i32, StackCalculatorError> {
        self.service
            .delay_pop(session_id, delay)
            .await
            .map_err(Into::into)
    }

    async fn reduce(
        &self,
        session_id: &SessionId,
        operator: &str,
    ) -> Result<(), StackCalculatorError> {
        self.service
            .reduce(session_id, operator)
            .map(|_| ())
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_client() -> StackCalculatorLocalClient {
        StackCalculatorLocalClient::new(Arc::new(Service::default()))
    }

    #[tokio::test]
    async fn test_push_reduce_pop() {
        let client = create_client();
        let session = client.create_session().await.unwrap();

        for v in [12, 18, 24] {
            client.push(&session, v).await.unwrap();
        }
        client.reduce(&session, "gcd").await.unwrap();

        assert_eq!(client.pop(&session).await.unwrap(), 6);
        assert!(client.is_empty(&session).await.unwrap());
    }

    #[tokio::test]
    async fn test_errors_are_converted() {
        let client = create_client();
        let session = client.create_session().await.unwrap();

        let err = client.pop(&session).await.unwrap_err();
        assert!(err.is_empty_stack());

        let err = client.reduce(&session, "median").await.unwrap_err();
        assert_eq!(
            err,
            StackCalculatorError::InvalidOperator("median".to_owned())
        );

        let err = client.is_empty(&SessionId::from("nope")).await.unwrap_err();
        assert!(err.is_unknown_session());
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let client: Arc<dyn StackCalculatorClientV1> = Arc::new(create_client());
        let session = client.create_session().await.unwrap();
        client.push(&session, 9).await.unwrap();
        let value = client
            .delay_pop(&session, Duration::from_millis(5))
            .await
            .unwrap();
        assert_eq!(value, 9);
    }
}
