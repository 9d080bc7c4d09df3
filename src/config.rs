//! Configuration management for Bookcat

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory used by the file backend
    pub path: String,
    pub redis_url: String,
    pub books_key: String,
    pub loans_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_results: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BOOKCAT__, e.g. BOOKCAT__SERVER__PORT)
            .add_source(
                Environment::with_prefix("BOOKCAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override Redis URL from REDIS_URL env var if present
            .set_override_option("storage.redis_url", env::var("REDIS_URL").ok())?
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> AppResult<Self> {
        Ok(config.try_deserialize()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: "data".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            books_key: "books".to_string(),
            loans_key: "loans".to_string(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.itbook.store/1.0".to_string(),
            timeout_secs: 10,
            max_results: 6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config = Config::builder()
            .set_override("storage.backend", "memory")
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .build()
            .unwrap();
        let app: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app.storage.backend, StorageBackend::Memory);
        assert_eq!(app.storage.books_key, "books");
        assert_eq!(app.server.port, 9000);
        assert_eq!(app.server.host, "127.0.0.1");
        assert_eq!(app.lookup.max_results, 6);
        assert_eq!(app.logging.level, "info");
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let config = Config::builder()
            .set_override("storage.backend", "sqlite")
            .unwrap()
            .build()
            .unwrap();

        let err = AppConfig::from_config(config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
