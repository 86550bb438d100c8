use std::{collections::HashMap, env, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

const CONFIG_PATH_VAR: &str = "PREDICTION_API_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub service: ServiceConfig,
    pub users: HashMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PathsConfig {
    pub result_path: PathBuf,
    pub text_path: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path))?;

        Self::from_json(&raw).with_context(|| format!("Invalid config file {}", path))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }

    /// Default tracing directives when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> String {
        let level = if self.service.debug { "debug" } else { "info" };
        format!("prediction_api={level},tower_http={level}")
    }
}
