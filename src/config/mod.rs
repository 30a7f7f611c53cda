//! Configuration loading and management
//!
//! Configuration comes from environment variables (`from_env`, the default
//! for deployments) or a YAML file (`from_yaml_file`). Every field has a
//! working default so a bare `AppConfig::from_env()` boots a local server.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::validation::ValidationOptions;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Document database settings (used by the `mongodb_backend` feature)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Validation knobs
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// MongoDB connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_mongodb_uri")]
    pub uri: String,

    #[serde(default = "default_database_name")]
    pub database: String,

    #[serde(default = "default_collection_name")]
    pub collection: String,
}

/// Validation settings that differ between deployments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum accepted email length; absent or zero disables the check
    #[serde(default = "default_email_max_len")]
    pub email_max_len: Option<usize>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "receivers".to_string()
}

fn default_collection_name() -> String {
    "receivers".to_string()
}

fn default_email_max_len() -> Option<usize> {
    Some(250)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            database: DatabaseConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_mongodb_uri(),
            database: default_database_name(),
            collection: default_collection_name(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            email_max_len: default_email_max_len(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `LISTEN_ADDR`, `MONGODB_URI`,
    /// `MONGODB_DATABASE`, `MONGODB_COLLECTION`, `EMAIL_MAX_LEN`
    /// (`0` disables the length check).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(uri) = std::env::var("MONGODB_URI") {
            config.database.uri = uri;
        }
        if let Ok(database) = std::env::var("MONGODB_DATABASE") {
            config.database.database = database;
        }
        if let Ok(collection) = std::env::var("MONGODB_COLLECTION") {
            config.database.collection = collection;
        }
        if let Ok(max) = std::env::var("EMAIL_MAX_LEN")
            && let Ok(max) = max.parse::<usize>()
        {
            config.validation.email_max_len = if max == 0 { None } else { Some(max) };
        }

        config
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// The validation options the service layer consumes.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            email_max_len: self.validation.email_max_len.filter(|max| *max > 0),
        }
    }
}
