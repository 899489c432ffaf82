//! Configuration for the stack calculator module.

use serde::{Deserialize, Serialize};

/// Configuration for the stack calculator module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct StackCalculatorConfig {
    /// Number of sessions the registry pre-allocates room for.
    /// Default: `64`
    pub initial_sessions_capacity: usize,

    /// Number of values each new session stack pre-allocates room for.
    /// Default: `16`
    pub stack_capacity: usize,
}

impl Default for StackCalculatorConfig {
    fn default() -> Self {
        Self {
            initial_sessions_capacity: 64,
            stack_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = StackCalculatorConfig::default();
        assert_eq!(cfg.initial_sessions_capacity, 64);
        assert_eq!(cfg.stack_capacity, 16);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: StackCalculatorConfig =
            serde_json::from_value(serde_json::json!({ "stack_capacity": 4 })).unwrap();
        assert_eq!(cfg.stack_capacity, 4);
        assert_eq!(cfg.initial_sessions_capacity, 64);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let res: Result<StackCalculatorConfig, _> =
            serde_json::from_value(serde_json::json!({ "max_sessions": 4 }));
        assert!(res.is_err());
    }
}
