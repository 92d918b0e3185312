//! Configuration loading for Stepwise.
//! Reads stepwise.toml from the current directory or path in STEPWISE_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "crates/stepwise-web/static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url()    -> String { "sqlite://stepwise.db".to_string() }
fn default_max_connections() -> u32    { 5 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_template_dir")]
    pub dir: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_template_dir()    -> String { "crates/stepwise-solver/templates".to_string() }
fn default_currency_symbol() -> String { stepwise_solver::renderer::DEFAULT_CURRENCY_SYMBOL.to_string() }

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            currency_symbol: default_currency_symbol(),
        }
    }
}


impl Config {
    /// Load configuration from stepwise.toml.
    /// Checks STEPWISE_CONFIG env var first, then current directory.
    /// A missing file yields the defaults; `DATABASE_URL` overrides `database.url`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("STEPWISE_CONFIG")
            .unwrap_or_else(|_| "stepwise.toml".to_string());
        Self::load_from(Path::new(&path), std::env::var("DATABASE_URL").ok())
    }

    /// Load from an explicit path, applying a database URL override if given.
    pub fn load_from(path: &Path, database_url: Option<String>) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file not found: {}, using defaults", path.display());
            Config::default()
        };

        if let Some(url) = database_url {
            config.database.url = url;
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
