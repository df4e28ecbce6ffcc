use crate::error::AppError;
use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/receipt_splitter";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,
    /// Statements slower than this are logged at warn level
    pub slow_statement_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 20,
                acquire_timeout_secs: 10,
                slow_statement_secs: 5,
            },
        }
    }
}

impl AppConfig {
    /// Loads defaults overlaid by `SPLITR_*` variables; `DATABASE_URL` wins for the database url
    pub fn load() -> Result<Self, AppError> {
        let env = config::Environment::with_prefix("SPLITR");
        let mut config = Self::load_from(env)?;
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        Ok(config)
    }

    /// Loads defaults overlaid by the given environment source
    pub fn load_from(env: config::Environment) -> Result<Self, AppError> {
        let defaults = Self::default();
        let config: Self = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.acquire_timeout_secs", defaults.database.acquire_timeout_secs as i64)?
            .set_default("database.slow_statement_secs", defaults.database.slow_statement_secs as i64)?
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        config::Environment::with_prefix("SPLITR").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_from(env(&[])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.acquire_timeout_secs, 10);
        assert_eq!(config.database.slow_statement_secs, 5);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::load_from(env(&[
            ("SPLITR_SERVER__PORT", "9000"),
            ("SPLITR_DATABASE__URL", "postgres://db/receipts"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "postgres://db/receipts");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_pool_timeouts_override() {
        let config = AppConfig::load_from(env(&[
            ("SPLITR_DATABASE__ACQUIRE_TIMEOUT_SECS", "3"),
            ("SPLITR_DATABASE__SLOW_STATEMENT_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.database.acquire_timeout_secs, 3);
        assert_eq!(config.database.slow_statement_secs, 1);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = AppConfig::load_from(env(&[("SPLITR_SERVER__PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
