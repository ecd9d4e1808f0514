//! Runtime configuration
//!
//! Everything is read from the environment once at startup.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_USDA_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("USDA_API_KEY is not set; a FoodData Central API key is required")]
    MissingApiKey,

    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Estimator configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub usda_api_key: String,
    pub usda_api_url: String,
    pub density_path: PathBuf,
    pub page_size: u32,
    pub max_in_flight: usize,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let usda_api_key = lookup("USDA_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let usda_api_url = lookup("USDA_API_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_USDA_API_URL.to_string());

        let density_path = lookup("RN_DENSITY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_density_path);

        let page_size = parse_var(&lookup, "RN_SEARCH_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_in_flight = parse_var(&lookup, "RN_MAX_IN_FLIGHT", DEFAULT_MAX_IN_FLIGHT)?;
        if max_in_flight == 0 {
            return Err(ConfigError::Invalid {
                var: "RN_MAX_IN_FLIGHT",
                value: "0".to_string(),
            });
        }
        let timeout_secs = parse_var(
            &lookup,
            "RN_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            usda_api_key,
            usda_api_url,
            density_path,
            page_size,
            max_in_flight,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

/// `data/densities.csv` under the project root
pub fn default_density_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("densities.csv");
    path
}
