// HTTP client utilities
use crate::domain::error::DashError;
use crate::infrastructure::config::UpstreamConfig;
use reqwest::Client;

/// Create the shared upstream HTTP client.
///
/// Every request carries the configured timeout so a stuck upstream cannot
/// hold the rate gate's queue forever.
pub fn create_client(config: &UpstreamConfig) -> Result<Client, DashError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()?)
}
