//! Layered host configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, the YAML file
//! given with `--config`, `APP__*` environment variables (`__` separates
//! nesting levels, e.g. `APP__SERVER__BIND_ADDR`), then CLI overrides.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context as _, Result};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use stack_calculator::StackCalculatorConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "APP__";

/// Log levels from least to most verbose.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub stack_calculator: StackCalculatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    /// Default: `127.0.0.1:8087`
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then `APP__*` variables.
    ///
    /// # Errors
    /// Fails if `path` is not an existing file or a layer does not match the
    /// configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Apply `--bind` and `-v` on top of the loaded layers.
    pub fn apply_cli_overrides(&mut self, bind: Option<&str>, verbose: u8) {
        if let Some(bind) = bind {
            bind.clone_into(&mut self.server.bind_addr);
        }
        if let Some(level) = raise_level(&self.logging.level, verbose) {
            self.logging.level = level.to_owned();
        }
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    /// Fails on an unparsable bind address or an unknown log level.
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address '{}'", self.server.bind_addr))?;
        level_index(&self.logging.level).with_context(|| {
            format!(
                "invalid log level '{}', expected one of: {}",
                self.logging.level,
                LEVELS.join(", ")
            )
        })?;
        Ok(())
    }

    /// Effective configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

fn level_index(level: &str) -> Option<usize> {
    LEVELS.iter().position(|l| l.eq_ignore_ascii_case(level))
}

/// Level implied by `-v` count, if more verbose than `current`.
fn raise_level(current: &str, verbose: u8) -> Option<&'static str> {
    let requested = match verbose {
        0 => return None,
        1 => 2,
        2 => 3,
        _ => 4,
    };
    match level_index(current) {
        Some(index) if index >= requested => None,
        _ => Some(LEVELS[requested]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_KEYS: [&str; 4] = [
        "APP__SERVER__BIND_ADDR",
        "APP__LOGGING__LEVEL",
        "APP__LOGGING__FORMAT",
        "APP__STACK_CALCULATOR__STACK_CAPACITY",
    ];

    fn write_yaml(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        temp_env::with_vars_unset(ENV_KEYS, || {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg, AppConfig::default());
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
            assert_eq!(cfg.logging.format, LogFormat::Text);
            cfg.validate().unwrap();
        });
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            &dir,
            "server:\n  bind_addr: \"0.0.0.0:9000\"\nstack_calculator:\n  stack_capacity: 4\n",
        );

        temp_env::with_vars_unset(ENV_KEYS, || {
            let cfg = AppConfig::load(Some(&path)).unwrap();
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.stack_calculator.stack_capacity, 4);
            assert_eq!(cfg.stack_calculator.initial_sessions_capacity, 64);
            assert_eq!(cfg.logging.level, "info");
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "logging:\n  level: warn\n  format: text\n");

        temp_env::with_vars(
            [
                ("APP__LOGGING__LEVEL", Some("debug")),
                ("APP__LOGGING__FORMAT", Some("json")),
                ("APP__SERVER__BIND_ADDR", None),
                ("APP__STACK_CALCULATOR__STACK_CAPACITY", Some("32")),
            ],
            || {
                let cfg = AppConfig::load(Some(&path)).unwrap();
                assert_eq!(cfg.logging.level, "debug");
                assert_eq!(cfg.logging.format, LogFormat::Json);
                assert_eq!(cfg.stack_calculator.stack_capacity, 32);
            },
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/config.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "server:\n  port: 8080\n");
        temp_env::with_vars_unset(ENV_KEYS, || {
            assert!(AppConfig::load(Some(&path)).is_err());
        });
    }

    #[test]
    fn test_cli_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(Some("127.0.0.1:0"), 2);
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:0");
        assert_eq!(cfg.logging.level, "debug");

        // -v never lowers an already more verbose level.
        cfg.logging.level = "trace".to_owned();
        cfg.apply_cli_overrides(None, 1);
        assert_eq!(cfg.logging.level, "trace");
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:0");
    }

    #[test]
    fn test_raise_level() {
        assert_eq!(raise_level("warn", 0), None);
        assert_eq!(raise_level("warn", 1), Some("info"));
        assert_eq!(raise_level("info", 1), None);
        assert_eq!(raise_level("info", 5), Some("trace"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.server.bind_addr = "localhost".to_owned();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".to_owned();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn test_pretty_json_contains_sections() {
        let json = AppConfig::default().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["server"]["bind_addr"], "127.0.0.1:8087");
        assert_eq!(value["logging"]["format"], "text");
        assert_eq!(value["stack_calculator"]["stack_capacity"], 16);
    }
}
