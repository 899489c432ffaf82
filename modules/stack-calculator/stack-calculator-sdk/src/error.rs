use crate::models::{ReduceOperator, SessionId};

/// Errors for the stack calculator service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackCalculatorError {
    #[error("Unknown session id {0}")]
    UnknownSession(SessionId),

    #[error("Cannot operate on an empty stack")]
    EmptyStack,

    #[error("Invalid operator: {0}. Valid operators are: min, max, gcd, lcm")]
    InvalidOperator(String),

    #[error("{operator} result does not fit in a 32-bit signed integer")]
    ResultOverflow { operator: ReduceOperator },

    #[error("Delayed pop was interrupted")]
    Interrupted,

    #[error("An internal error occurred: {0}")]
    Internal(String),
}

impl StackCalculatorError {
    #[must_use]
    pub fn is_unknown_session(&self) -> bool {
        matches!(self, Self::UnknownSession(_))
    }

    #[must_use]
    pub fn is_empty_stack(&self) -> bool {
        matches!(self, Self::EmptyStack)
    }

    #[must_use]
    pub fn is_invalid_operator(&self) -> bool {
        matches!(self, Self::InvalidOperator(_))
    }

    #[must_use]
    pub fn is_result_overflow(&self) -> bool {
        matches!(self, Self::ResultOverflow { .. })
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
