//! Shared helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use nba_dashboard::application::seed::fallback_players;
use nba_dashboard::domain::error::DashError;
use nba_dashboard::domain::model::PlayerRecord;
use nba_dashboard::domain::traits::PlayerService;
use nba_dashboard::infrastructure::config::Config;
use nba_dashboard::state::AppState;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub enum Scripted {
    Players(Vec<PlayerRecord>),
    RateLimited,
    Upstream(&'static str),
}

/// In-memory `PlayerService` that replays scripted answers and counts calls.
///
/// When the script runs out, searches return an empty list.
#[derive(Default)]
pub struct MockPlayers {
    script: Mutex<VecDeque<Scripted>>,
    seed: Mutex<Option<Vec<PlayerRecord>>>,
    search_calls: AtomicUsize,
    load_calls: AtomicUsize,
    terms: Mutex<Vec<String>>,
}

impl MockPlayers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, answer: Scripted) {
        self.script.lock().unwrap().push_back(answer);
    }

    pub fn set_seed(&self, players: Vec<PlayerRecord>) {
        *self.seed.lock().unwrap() = Some(players);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerService for MockPlayers {
    async fn search_players(&self, term: &str) -> Result<Vec<PlayerRecord>, DashError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.terms.lock().unwrap().push(term.to_string());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Players(players)) => Ok(players),
            Some(Scripted::RateLimited) => Err(DashError::RateLimited),
            Some(Scripted::Upstream(body)) => Err(DashError::Upstream(body.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn load_players(&self) -> Result<Vec<PlayerRecord>, DashError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        match self.seed.lock().unwrap().clone() {
            Some(players) => Ok(players),
            None => Err(DashError::Upstream("seed unavailable".to_string())),
        }
    }
}

pub fn test_config(ttl: Duration) -> Config {
    let mut config = Config::default();
    config.cache.ttl_secs = ttl.as_secs();
    config
}

/// State backed by `mock`, with the index preloaded with the fallback set.
pub async fn seeded_state(mock: Arc<MockPlayers>) -> AppState {
    seeded_state_with_ttl(mock, Duration::from_secs(600)).await
}

pub async fn seeded_state_with_ttl(mock: Arc<MockPlayers>, ttl: Duration) -> AppState {
    let mut state = AppState::with_service(test_config(ttl), mock);
    state.cache = Arc::new(nba_dashboard::infrastructure::storage::cache::ResultCache::new(ttl));
    state.index.merge(fallback_players()).await;
    state
}

pub fn player(id: i64, first: &str, last: &str) -> PlayerRecord {
    PlayerRecord::new(id, first, last)
}
