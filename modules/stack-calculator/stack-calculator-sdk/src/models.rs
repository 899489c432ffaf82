//! Session and operator types shared by every transport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StackCalculatorError;

/// Opaque session token.
///
/// Unique among live sessions and stable for the session's lifetime. No
/// other property of its format is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduction applied to every value of a session's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceOperator {
    Min,
    Max,
    Gcd,
    Lcm,
}

impl ReduceOperator {
    /// All recognized operators, in their canonical order.
    pub const ALL: [Self; 4] = [Self::Min, Self::Max, Self::Gcd, Self::Lcm];

    /// Wire token of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Gcd => "gcd",
            Self::Lcm => "lcm",
        }
    }
}

impl fmt::Display for ReduceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReduceOperator {
    type Err = StackCalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| StackCalculatorError::InvalidOperator(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_recognized_token() {
        for op in ReduceOperator::ALL {
            assert_eq!(op.as_str().parse::<ReduceOperator>(), Ok(op));
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_tokens() {
        for token in ["sum", "", "MIN", " gcd", "lcm "] {
            let err = token.parse::<ReduceOperator>().unwrap_err();
            assert_eq!(err, StackCalculatorError::InvalidOperator(token.to_owned()));
        }
    }

    #[test]
    fn operator_serializes_as_lowercase_token() {
        let json = serde_json::to_string(&ReduceOperator::Gcd).unwrap();
        assert_eq!(json, "\"gcd\"");
    }

    #[test]
    fn session_id_is_transparent_string() {
        let id = SessionId::new("f00d");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"f00d\"");
        assert_eq!(id.to_string(), "f00d");
        assert_eq!(id.as_str(), "f00d");
    }
}
