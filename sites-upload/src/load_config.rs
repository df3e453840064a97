//! `load_config` module: loads the optional YAML service configuration.
//!
//! The file only describes *where* the sites service lives and how patient the
//! HTTP client should be. Credentials never go in this file; they only come from
//! command-line flags.
//!
//! # Accepted schema
//! ```yaml
//! base_url: https://sites.ecmwf.int
//! timeout_secs: 300
//! ```
//! Every key is optional; unknown keys are rejected so typos surface early.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://sites.ecmwf.int";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Where and how to reach the sites service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Loads the service config from `path`, or the defaults when no path is given.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<ServiceConfig> {
    let Some(path) = path else {
        info!(base_url = DEFAULT_BASE_URL, "No config file given, using defaults");
        return Ok(ServiceConfig::default());
    };
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(e).with_context(|| format!("Failed to read config file {path_ref:?}"));
        }
    };

    let config: ServiceConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => conf,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(e).with_context(|| format!("Failed to parse config YAML {path_ref:?}"));
        }
    };

    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "Config loaded successfully"
    );
    Ok(config)
}
