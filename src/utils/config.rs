// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{PathCollector, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATHS};
use super::{validate_not_blank, validate_range, AppError, AppResult};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub detection: DetectionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub enable_cors: bool,
}

/// Storage configuration for saved auth presets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(rename = "type")]
    pub type_: String,
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Demo request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

/// Column detection limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub max_depth: usize,
    pub max_paths: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            enable_cors: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            type_: "memory".to_string(),
            path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig { timeout_secs: 30 }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_paths: DEFAULT_MAX_PATHS,
        }
    }
}

impl DetectionConfig {
    /// Build a path collector with these limits
    pub fn collector(&self) -> PathCollector {
        PathCollector::new(self.max_depth, self.max_paths)
    }
}

impl Config {
    /// Load configuration from a `.json`, `.yaml` or `.yml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

        let config: Config = match extension {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?,
            _ => return Err(AppError::Config("Unsupported config file format".to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the values a file may have gotten wrong
    pub fn validate(&self) -> AppResult<()> {
        validate_not_blank(&self.server.host, "server.host").map_err(AppError::Config)?;
        validate_range(self.detection.max_depth, 1, 64, "detection.max_depth").map_err(AppError::Config)?;
        validate_range(self.detection.max_paths, 1, 100_000, "detection.max_paths").map_err(AppError::Config)?;

        match self.storage.type_.as_str() {
            "memory" | "file" => Ok(()),
            other => Err(AppError::Config(format!("Unknown storage type: {}", other))),
        }
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}
