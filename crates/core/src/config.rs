//! TOML-based configuration system for Campus.

use crate::error::{CampusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest page size a deployment may configure for list endpoints.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Top-level Campus configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    pub campus: CampusSection,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Core Campus instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusSection {
    pub instance_name: String,
    pub data_dir: String,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: Some("/var/lib/campus/campus.db".into()),
        }
    }
}

impl DatabaseConfig {
    /// Connection string for the configured SQLite file, created on first open.
    pub fn connect_url(&self) -> Option<String> {
        self.path.as_deref().map(|p| format!("sqlite:{p}?mode=rwc"))
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

/// REST API behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

impl CampusConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CampusError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.campus.instance_name.is_empty() {
            return Err(CampusError::Config(
                "campus.instance_name must not be empty".into(),
            ));
        }

        if self.campus.data_dir.is_empty() {
            return Err(CampusError::Config(
                "campus.data_dir must not be empty".into(),
            ));
        }

        match self.campus.database.path.as_deref() {
            None | Some("") => {
                return Err(CampusError::Config(
                    "campus.database.path is required".into(),
                ));
            }
            Some(_) => {}
        }

        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            return Err(CampusError::Config(format!(
                "api.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(())
    }

    /// Generate a sensible default configuration.
    pub fn generate_default() -> Self {
        Self {
            campus: CampusSection {
                instance_name: "My School District".into(),
                data_dir: "/var/lib/campus".into(),
                database: DatabaseConfig::default(),
            },
            server: ServerConfig::default(),
            api: ApiConfig::default(),
        }
    }
}
