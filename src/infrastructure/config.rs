use crate::domain::error::DashError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_KEY: &str = "BALLDONTLIE_API_KEY";
pub const ENV_PORT: &str = "PORT";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_players_path")]
    pub players_path: String,
    pub api_key: Option<String>,
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_min_spacing_ms")]
    pub min_spacing_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    #[serde(default = "default_seed_page_size")]
    pub seed_page_size: u32,
    #[serde(default = "default_rate_limit_marker")]
    pub rate_limit_marker: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            players_path: default_players_path(),
            api_key: None,
            auth_header: default_auth_header(),
            user_agent: default_user_agent(),
            min_spacing_ms: default_min_spacing_ms(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            search_page_size: default_search_page_size(),
            seed_page_size: default_seed_page_size(),
            rate_limit_marker: default_rate_limit_marker(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl UpstreamConfig {
    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn players_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.players_path
        )
    }
}

impl Logging {
    /// `EnvFilter` directive for the configured level; unknown levels mean info.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "info",
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, DashError> {
        Ok(toml::from_str::<Config>(content)?)
    }

    /// Apply `BALLDONTLIE_API_KEY` / `PORT` style overrides.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production; tests pass a closure.
    /// Runs before logging is initialized, so problems go to stderr.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.upstream.api_key = Some(key);
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Warning: Ignoring invalid {} value: {:?}", ENV_PORT, port),
            }
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5001
}
fn default_base_url() -> String {
    "https://api.balldontlie.io".to_string()
}
fn default_players_path() -> String {
    "/nba/v1/players".to_string()
}
fn default_auth_header() -> String {
    "Authorization".to_string()
}
fn default_user_agent() -> String {
    "NBA-Dashboard/1.0".to_string()
}
fn default_min_spacing_ms() -> u64 {
    2000
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_retries() -> u32 {
    1
}
fn default_search_page_size() -> u32 {
    100
}
fn default_seed_page_size() -> u32 {
    500
}
fn default_rate_limit_marker() -> String {
    "Too many".to_string()
}
fn default_ttl_secs() -> u64 {
    10 * 60
}
fn default_sweep_interval_secs() -> u64 {
    60
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nba-dashboard").join("config.toml"))
}

/// Load the config file (explicit path, or the default location) and apply
/// environment overrides. A missing file yields defaults; a broken one is
/// reported and ignored.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, DashError> {
    let path = explicit.map(Path::to_path_buf).or_else(get_config_path);

    let mut config = Config::default();
    if let Some(path) = path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match Config::from_toml_str(&content) {
                Ok(parsed) => config = parsed,
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                }
            }
        } else if explicit.is_some() {
            return Err(DashError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
    }

    Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
}

pub fn generate_config_sample(target: Option<&Path>) -> Result<PathBuf, DashError> {
    let path = match target.map(Path::to_path_buf).or_else(get_config_path) {
        Some(path) => path,
        None => {
            return Err(DashError::Config(
                "Cannot determine config directory".to_string(),
            ))
        }
    };

    if path.exists() {
        return Err(DashError::Config(format!(
            "Config file already exists at: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| DashError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)?;

    Ok(path)
}
