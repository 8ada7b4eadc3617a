use serde::Deserialize;
use std::fs;
use tracing::info;

use crate::constants;
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Knobs for the search pipeline; defaults mirror constants.rs.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_per_keyword_hits")]
    pub per_keyword_hits: usize,
    #[serde(default = "default_deep_scan_hits")]
    pub deep_scan_hits: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load config.toml, falling back to built-in defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                info!("Using default configuration: {}", e);
                Config::default()
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            country: default_country(),
            lang: default_lang(),
            per_keyword_hits: default_per_keyword_hits(),
            deep_scan_hits: default_deep_scan_hits(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_country() -> String {
    constants::DEFAULT_COUNTRY.to_string()
}

fn default_lang() -> String {
    constants::DEFAULT_LANG.to_string()
}

fn default_per_keyword_hits() -> usize {
    constants::PER_KEYWORD_HITS
}

fn default_deep_scan_hits() -> usize {
    constants::DEEP_SCAN_HITS
}

fn default_timeout_seconds() -> u64 {
    constants::DEFAULT_TIMEOUT_SECONDS
}
