//! Application configuration loaded from environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dataset::DatasetScanner;
use crate::error::{DashboardError, Result};

/// Name of the data directory next to the application root.
pub const DEFAULT_DATA_DIR_NAME: &str = "data";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Data Source ===
    /// Directory scanned for `*.csv` datasets. Defaults to `<app root>/data`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Root of the deployed application, fixed at build time.
fn app_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("HOST must not be empty".to_string());
        }

        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err("DATA_DIR must not be empty when set".to_string());
            }
        }

        Ok(())
    }

    /// Absolute path of the directory to scan.
    ///
    /// An explicit `DATA_DIR` wins; relative values are anchored at the
    /// current directory. Otherwise the `data` directory under the
    /// application root is used, independent of the working directory.
    pub fn resolve_data_dir(&self) -> std::io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(std::env::current_dir()?.join(dir)),
            None => Ok(app_root().join(DEFAULT_DATA_DIR_NAME)),
        }
    }

    /// Validate and build a scanner for the resolved data directory.
    pub fn scanner(&self) -> Result<DatasetScanner> {
        self.validate().map_err(DashboardError::InvalidConfig)?;
        Ok(DatasetScanner::new(self.resolve_data_dir()?))
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
