use crate::domain::model::{normalize_term, PlayerRecord};
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct IndexInner {
    players: Vec<PlayerRecord>,
    ids: HashSet<i64>,
}

impl IndexInner {
    fn merge<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        let mut added = 0;
        for record in records {
            if self.ids.insert(record.id) {
                self.players.push(record);
                added += 1;
            }
        }
        added
    }
}

/// In-memory, append-only collection of every player seen so far.
///
/// Ids are unique: merging a record whose id is already present is a no-op,
/// existing records are never replaced.
#[derive(Debug, Default)]
pub struct PlayerIndex {
    inner: RwLock<IndexInner>,
}

impl PlayerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        let mut inner = IndexInner::default();
        inner.merge(records);
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// All players whose name matches `term`, in insertion order.
    pub async fn scan(&self, term: &str) -> Vec<PlayerRecord> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Vec::new();
        }

        let inner = self.inner.read().await;
        inner
            .players
            .iter()
            .filter(|player| matches_name(player, &term))
            .cloned()
            .collect()
    }

    /// Append records with unseen ids. Returns how many were added.
    pub async fn merge<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        self.inner.write().await.merge(records)
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.inner.read().await.ids.contains(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.players.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Name match against an already normalized (trimmed, lowercased) term.
///
/// Any of: "first last", "last first", first alone, last alone, or
/// "first last" against the term with its tokens reversed.
pub fn matches_name(player: &PlayerRecord, term: &str) -> bool {
    let first = player.first_name.to_lowercase();
    let last = player.last_name.to_lowercase();
    let full_name = format!("{} {}", first, last);
    let reversed_name = format!("{} {}", last, first);
    let reversed_term = term.split_whitespace().rev().collect::<Vec<_>>().join(" ");

    full_name.contains(term)
        || reversed_name.contains(term)
        || first.contains(term)
        || last.contains(term)
        || full_name.contains(&reversed_term)
}
