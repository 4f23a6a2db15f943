// In-memory result cache using DashMap
use crate::domain::model::SearchResult;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: SearchResult,
    pub created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Thread-safe, time-expiring memo of full search responses.
///
/// Keys are normalized search terms. Expired entries are removed on read and
/// by [`ResultCache::purge_expired`], which the sweeper task calls
/// periodically.
#[derive(Debug)]
pub struct ResultCache {
    map: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<SearchResult> {
        // The shard guard must be released before removing.
        let expired = match self.map.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.result.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.map.remove_if(key, |_, entry| entry.is_expired(self.ttl));
            debug!("Cache entry expired: {:?}", key);
        }
        None
    }

    pub fn insert(&self, key: String, result: SearchResult) {
        self.map.insert(
            key,
            CacheEntry {
                result,
                created_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(self.ttl));
        before.saturating_sub(self.map.len())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Spawn the background sweep. The task runs until aborted.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = self.purge_expired();
                if removed > 0 {
                    debug!("Cache sweep removed {} expired entries", removed);
                }
            }
        })
    }
}
