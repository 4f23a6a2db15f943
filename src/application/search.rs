use crate::domain::error::DashError;
use crate::domain::model::{normalize_term, SearchResult, SearchSource};
use crate::state::AppState;
use tracing::{debug, info, warn};

pub const MSG_MISSING_NAME: &str = "Please provide a player name";
pub const MSG_NOT_FOUND: &str = "Player not found";
pub const MSG_RATE_LIMITED: &str = "API rate limit exceeded. Please try again in a few seconds.";
pub const MSG_UNAVAILABLE: &str = "Service temporarily unavailable. Please try again.";

/// Resolve a player name query: cache, then local index, then upstream.
///
/// Never fails; every outcome is encoded in the returned envelope's `source`.
/// Only successful lookups (local or remote) are cached.
pub async fn search_players(state: &AppState, raw_name: Option<&str>) -> SearchResult {
    let name = raw_name.unwrap_or("");
    let key = normalize_term(name);

    if key.is_empty() {
        return SearchResult::failed(name, MSG_MISSING_NAME, SearchSource::Error);
    }

    info!("Searching for: {:?}", name);

    // 1. Result cache
    if let Some(mut cached) = state.cache.get(&key) {
        debug!("Cache hit for: {:?}", name);
        cached.source = SearchSource::Cache;
        return cached;
    }

    // 2. Local index
    let local = state.index.scan(&key).await;
    if !local.is_empty() {
        info!("Local search found {} players", local.len());
        let result = SearchResult::found(name, local, SearchSource::Local);
        state.cache.insert(key, result.clone());
        return result;
    }

    // 3. Upstream
    debug!("Falling back to upstream search for: {:?}", name);
    match state.players.search_players(name).await {
        Ok(players) if !players.is_empty() => {
            let added = state.index.merge(players.iter().cloned()).await;
            info!(
                "Upstream search found {} players ({} new to the index)",
                players.len(),
                added
            );
            let result = SearchResult::found(name, players, SearchSource::Remote);
            state.cache.insert(key, result.clone());
            result
        }
        Ok(_) => {
            info!("No players found for: {:?}", name);
            SearchResult::failed(name, MSG_NOT_FOUND, SearchSource::NotFound)
        }
        Err(e) => failure_result(name, &e),
    }
}

fn failure_result(name: &str, error: &DashError) -> SearchResult {
    if error.is_rate_limited() {
        warn!("Upstream rate limited search for {:?}", name);
        SearchResult::failed(name, MSG_RATE_LIMITED, SearchSource::RateLimited)
    } else {
        warn!("Search error for {:?}: {}", name, error);
        SearchResult::failed(name, MSG_UNAVAILABLE, SearchSource::Error)
    }
}
