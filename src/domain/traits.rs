use crate::domain::error::DashError;
use crate::domain::model::PlayerRecord;
use async_trait::async_trait;

/// Source of authoritative player data.
///
/// The search path only ever talks to the upstream through this trait, so the
/// HTTP client can be swapped for an in-memory double in tests.
#[async_trait]
pub trait PlayerService: Send + Sync {
    /// Search players by free-text name. An empty list is a valid answer.
    async fn search_players(&self, term: &str) -> Result<Vec<PlayerRecord>, DashError>;

    /// Bulk fetch used once at startup to seed the local index.
    async fn load_players(&self) -> Result<Vec<PlayerRecord>, DashError>;
}
