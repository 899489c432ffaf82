use stack_calculator_sdk::{ReduceOperator, SessionId, StackCalculatorError};

use super::reduction::ReductionError;

/// Domain-level errors for the stack calculator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("Cannot operate on an empty stack")]
    EmptyStack,

    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("{operator} result does not fit in a 32-bit signed integer")]
    ResultOverflow { operator: ReduceOperator },

    #[error("Delayed pop was interrupted")]
    Interrupted,
}

impl DomainError {
    /// Attach the operator to a failure reported by the reduction functions.
    pub(crate) fn from_reduction(operator: ReduceOperator, e: ReductionError) -> Self {
        match e {
            ReductionError::EmptyInput => Self::EmptyStack,
            ReductionError::ResultOverflow => Self::ResultOverflow { operator },
        }
    }
}

impl From<DomainError> for StackCalculatorError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownSession(id) => Self::UnknownSession(id),
            DomainError::EmptyStack => Self::EmptyStack,
            DomainError::InvalidOperator(token) => Self::InvalidOperator(token),
            DomainError::ResultOverflow { operator } => Self::ResultOverflow { operator },
            DomainError::Interrupted => Self::Interrupted,
        }
    }
}
