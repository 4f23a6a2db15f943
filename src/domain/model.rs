use serde::{Deserialize, Serialize};

/// A single NBA player as stored in the local index and returned to the UI.
///
/// Only `id`, `first_name` and `last_name` are guaranteed. Everything else is
/// whatever the upstream happened to send, normalized to strings/integers at
/// the client boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub height: Option<String>, // e.g. "6-9"
    #[serde(default)]
    pub weight: Option<String>, // pounds
    #[serde(default)]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub draft_year: Option<i64>,
    #[serde(default)]
    pub draft_round: Option<i64>,
    #[serde(default)]
    pub draft_number: Option<i64>,
    #[serde(default)]
    pub team: Option<TeamRecord>,
}

/// Cache key / match form of a user query: trimmed and lowercased.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// Embedded by value, never indexed on its own
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub full_name: String,
    pub abbreviation: String,
    pub city: String,
    pub conference: String,
    pub division: String,
}

impl PlayerRecord {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            position: None,
            height: None,
            weight: None,
            jersey_number: None,
            college: None,
            country: None,
            draft_year: None,
            draft_round: None,
            draft_number: None,
            team: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// 查询源枚举
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    Cache,
    Local,
    Remote,
    NotFound,
    RateLimited,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchParameters {
    pub search: String,
}

/// The envelope every search endpoint answers with.
///
/// `results` always equals `response.len()`; `errors` is empty on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub get: String,
    pub parameters: SearchParameters,
    pub errors: Vec<String>,
    pub results: usize,
    pub response: Vec<PlayerRecord>,
    pub source: SearchSource,
}

impl SearchResult {
    pub fn found(query: &str, players: Vec<PlayerRecord>, source: SearchSource) -> Self {
        Self {
            get: "players".to_string(),
            parameters: SearchParameters {
                search: query.to_string(),
            },
            errors: Vec::new(),
            results: players.len(),
            response: players,
            source,
        }
    }

    pub fn failed(query: &str, message: &str, source: SearchSource) -> Self {
        Self {
            get: "players".to_string(),
            parameters: SearchParameters {
                search: query.to_string(),
            },
            errors: vec![message.to_string()],
            results: 0,
            response: Vec::new(),
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub players_in_database: usize,
    pub cache_size: usize,
    pub uptime: f64, // seconds
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
