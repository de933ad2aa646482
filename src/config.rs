//! Runtime configuration.
//!
//! Configuration is resolved once in `main` and passed into the client. The
//! YAML file carries the API location and the retry policy; the API key only
//! ever comes from the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::api::retry::RetryPolicy;
use crate::error::{AssessError, AssessResult};

pub const DEFAULT_BASE_URL: &str = "https://assessment.ksensetech.com/api";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const API_KEY_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "ASSESSMENT_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> AssessResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AssessError::Config("api.base_url cannot be empty".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(AssessError::Config(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Applies a base URL override. Blank overrides are ignored.
    pub fn override_base_url(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Layers the environment and then the command line over the file
    /// values, and validates the result.
    pub fn apply_overrides(
        &mut self,
        env_base_url: Option<String>,
        cli_base_url: Option<String>,
    ) -> AssessResult<()> {
        self.override_base_url(env_base_url);
        self.override_base_url(cli_base_url);
        self.validate()
    }
}

/// Reads a YAML config file. Validation waits for `apply_overrides`.
pub fn load_config(path: &Path) -> AssessResult<Config> {
    let content = fs::read_to_string(path).map_err(|source| AssessError::ConfigIo {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config =
        serde_yaml::from_str(&content).map_err(|source| AssessError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(config)
}

/// Loads `explicit` if given, else `config.yaml` from the working directory
/// when present, else the built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> AssessResult<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Reads the API key from the process environment.
pub fn api_key_from_env() -> AssessResult<String> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

fn api_key_from(value: Option<String>) -> AssessResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(AssessError::MissingApiKey(API_KEY_ENV)),
    }
}
