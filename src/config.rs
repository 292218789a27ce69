//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (prefix: PETS_)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/pets-api/{service_name}/config.toml
//! 4. System directory: /etc/pets-api/{service_name}/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Pet store (SurrealDB) configuration
    pub store: StoreConfig,

    /// API behavior configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Pet store (SurrealDB) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection URL (ws://, http://, or mem:// for testing)
    pub url: String,

    /// Namespace to select after connecting
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Database to select after connecting
    #[serde(default = "default_database")]
    pub database: String,

    /// Root username (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Root password (optional)
    #[serde(default)]
    pub password: Option<String>,

    /// Maximum retry attempts for establishing the connection
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Define the pet_uid index as UNIQUE so the store rejects duplicate UIDs.
    /// Left to the store on purpose: an application-level check-then-insert
    /// would race under concurrent creates.
    #[serde(default = "default_false")]
    pub enforce_unique_uid: bool,
}

/// API behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Report store failures on the by-UID routes as 404 instead of 500.
    /// Earlier deployments of this API never surfaced a 500 from those routes,
    /// and some clients treat any non-404 error as fatal.
    #[serde(default = "default_false")]
    pub legacy_error_mapping: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            legacy_error_mapping: false,
        }
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS configuration
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_namespace() -> String {
    "paws".to_string()
}

fn default_database() -> String {
    "pets".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

fn default_false() -> bool {
    false
}

fn default_body_limit_mb() -> usize {
    10 // 10 MB
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// The service name is inferred from the binary name; prefer
    /// [`Config::load_for_service`] in production.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "pets-api".to_string());

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    ///
    /// Searches for config files in this order (first found is used):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/pets-api/{service_name}/config.toml
    /// 3. System directory: /etc/pets-api/{service_name}/config.toml
    ///
    /// Environment variables (PETS_ prefix) override all file-based configs.
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge config files in reverse order (lowest priority first)
        // so that higher priority files override lower ones
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        // Environment variables have highest priority
        figment = figment.merge(Env::prefixed("PETS_").split("_"));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the XDG search and loads directly from the given path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PETS_").split("_"))
            .extract()?;

        Ok(config)
    }

    /// Find all possible config file paths for a service
    ///
    /// Returns paths in priority order (highest first).
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current working directory (highest priority for dev/testing)
        paths.push(PathBuf::from("config.toml"));

        // 2. XDG config directory (~/.config/pets-api/{service_name}/config.toml)
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pets-api");
        let config_file_path = Path::new(service_name).join("config.toml");
        if let Ok(path) = xdg_dirs.place_config_file(&config_file_path) {
            paths.push(path);
        }

        // 3. System-wide directory (/etc/pets-api/{service_name}/config.toml)
        paths.push(
            PathBuf::from("/etc/pets-api")
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "pets-api".to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            store: StoreConfig {
                url: "ws://localhost:8000".to_string(),
                namespace: default_namespace(),
                database: default_database(),
                username: None,
                password: None,
                max_retries: default_max_retries(),
                retry_delay_secs: default_retry_delay(),
                enforce_unique_uid: false,
            },
            api: ApiConfig::default(),
            middleware: MiddlewareConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.store.namespace, "paws");
        assert_eq!(config.store.database, "pets");
        assert!(!config.store.enforce_unique_uid);
        assert!(!config.api.legacy_error_mapping);
    }

    #[test]
    fn test_default_middleware_config() {
        let config = MiddlewareConfig::default();
        assert_eq!(config.body_limit_mb, 10);
        assert_eq!(config.cors_mode, "permissive");
    }
}
