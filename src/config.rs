//! Server configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults (`0.0.0.0:3000`, `./public`, 8 KiB read buffer)
//! 2. A YAML file named by `SADAO_CONFIG`, if set
//! 3. The `PORT` and `PUBLIC_DIR` environment variables
//!
//! ```yaml
//! server:
//!   host: 127.0.0.1
//!   port: 8080
//!   read_buffer_size: 8192
//! static_files:
//!   public_dir: ./public
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::DEFAULT_READ_BUFFER_SIZE;

/// Environment variable naming an optional YAML config file
pub const CONFIG_ENV: &str = "SADAO_CONFIG";
/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding the public directory
pub const PUBLIC_DIR_ENV: &str = "PUBLIC_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Listening port
    pub port: u16,

    /// Maximum bytes read from a single request
    pub read_buffer_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Root directory that files are served from
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("./public"),
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads the configuration using `lookup` to read variables.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(port) = lookup(PORT_ENV) {
            cfg.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {:?}", PORT_ENV, port))?;
        }

        if let Some(dir) = lookup(PUBLIC_DIR_ENV) {
            cfg.static_files.public_dir = PathBuf::from(dir);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).context("Failed to parse config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// `host:port` as passed to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.read_buffer_size == 0 {
            anyhow::bail!("read_buffer_size must be greater than zero");
        }
        Ok(())
    }
}
