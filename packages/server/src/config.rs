use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty disables the CORS layer.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Bind address, also advertised in search photo links.
    pub host: String,
    pub port: u16,
    /// Directory holding the static HTML forms.
    pub public_dir: PathBuf,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Advertised origin, e.g. `http://127.0.0.1:3000`.
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory photos are written to. Created on startup if missing.
    pub cache_dir: PathBuf,
    /// Largest accepted photo in bytes.
    pub max_photo_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("INVENTORY_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.public_dir", "./public")?
            .set_default("storage.cache_dir", "./cache")?
            .set_default("storage.max_photo_size", 10_i64 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., INVENTORY__SERVER__PORT)
            .add_source(Environment::with_prefix("INVENTORY").separator("__"))
            // Command-line flags win over everything else.
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option(
                "storage.cache_dir",
                cli.cache
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?;

        s.try_deserialize()
    }
}
