use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl DashError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DashError::RateLimited)
    }
}
