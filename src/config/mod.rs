//! Configuration loading and management
//!
//! Settings come from an optional YAML file (path in `MARKETPLACE_CONFIG`)
//! and are then overridden by environment variables. Everything has a
//! default, so a bare `marketplace-server` starts on port 5000 with no store.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_VAR: &str = "MARKETPLACE_CONFIG";

/// Which storage backend the server opens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// MongoDB when a URI is configured, otherwise the unavailable store
    #[default]
    Auto,
    /// Process-local in-memory store
    Memory,
    /// MongoDB; without a reachable server every request fails
    Mongodb,
}

impl std::str::FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StorageKind::Auto),
            "memory" | "in-memory" => Ok(StorageKind::Memory),
            "mongodb" | "mongo" => Ok(StorageKind::Mongodb),
            other => Err(anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// MongoDB connection string
    pub mongodb_uri: Option<String>,

    /// MongoDB database name
    pub database: String,

    pub storage: StorageKind,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Answer CORS preflights for any origin
    pub cors_allow_any: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            mongodb_uri: None,
            database: "shop_marketplace".to_string(),
            storage: StorageKind::Auto,
            log_level: "info".to_string(),
            cors_allow_any: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// File named by `MARKETPLACE_CONFIG` (if any), then process environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` returns the value of a variable; empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }
        if let Some(uri) = var("MONGODB_URI") {
            self.mongodb_uri = Some(uri);
        }
        if let Some(database) = var("MONGODB_DATABASE") {
            self.database = database;
        }
        if let Some(storage) = var("MARKETPLACE_STORAGE") {
            self.storage = storage.parse()?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Backend to open once `auto` is resolved
    pub fn resolved_storage(&self) -> StorageKind {
        match self.storage {
            StorageKind::Auto if self.mongodb_uri.is_some() => StorageKind::Mongodb,
            other => other,
        }
    }

    /// Socket address to listen on
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
