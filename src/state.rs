use crate::domain::error::DashError;
use crate::domain::traits::PlayerService;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::BallDontLieClient;
use crate::infrastructure::storage::cache::ResultCache;
use crate::infrastructure::storage::index::PlayerIndex;
use std::sync::Arc;
use tokio::time::Instant;

/// Everything a request handler needs, constructed once per process.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<PlayerIndex>,
    pub cache: Arc<ResultCache>,
    pub players: Arc<dyn PlayerService>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, DashError> {
        let client = BallDontLieClient::new(config.upstream.clone())?;
        Ok(Self::with_service(config, Arc::new(client)))
    }

    pub fn with_service(config: Config, players: Arc<dyn PlayerService>) -> Self {
        Self {
            index: Arc::new(PlayerIndex::new()),
            cache: Arc::new(ResultCache::new(config.cache.ttl())),
            players,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
