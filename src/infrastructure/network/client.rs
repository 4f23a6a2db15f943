use crate::domain::error::DashError;
use crate::domain::model::{PlayerRecord, TeamRecord};
use crate::domain::traits::PlayerService;
use crate::infrastructure::config::UpstreamConfig;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::rate_limit::RateGate;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

// Scalars arrive as numbers or strings depending on the endpoint version, so
// they are kept as raw JSON until conversion.
#[derive(Deserialize, Debug)]
struct RawPlayer {
    id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    position: Option<Value>,
    height: Option<Value>,
    weight: Option<Value>,
    jersey_number: Option<Value>,
    college: Option<Value>,
    country: Option<Value>,
    draft_year: Option<Value>,
    draft_round: Option<Value>,
    draft_number: Option<Value>,
    team: Option<RawTeam>,
}

#[derive(Deserialize, Debug)]
struct RawTeam {
    id: Option<i64>,
    name: Option<String>,
    full_name: Option<String>,
    abbreviation: Option<String>,
    city: Option<String>,
    conference: Option<String>,
    division: Option<String>,
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int(value: Option<Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl RawTeam {
    fn into_team(self) -> Option<TeamRecord> {
        Some(TeamRecord {
            id: self.id?,
            name: self.name,
            full_name: self.full_name.unwrap_or_default(),
            abbreviation: self.abbreviation.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            conference: self.conference.unwrap_or_default(),
            division: self.division.unwrap_or_default(),
        })
    }
}

impl RawPlayer {
    fn into_record(self) -> Option<PlayerRecord> {
        Some(PlayerRecord {
            id: self.id?,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            position: text(self.position),
            height: text(self.height),
            weight: text(self.weight),
            jersey_number: text(self.jersey_number),
            college: text(self.college),
            country: text(self.country),
            draft_year: int(self.draft_year),
            draft_round: int(self.draft_round),
            draft_number: int(self.draft_number),
            team: self.team.and_then(RawTeam::into_team),
        })
    }
}

/// Pull player records out of a parsed page body.
///
/// Anything but an object with a `data` array is an empty page. Entries are
/// converted one by one; malformed ones and those without an id are dropped.
fn page_records(page: Value) -> Vec<PlayerRecord> {
    let entries = match page {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let total = entries.len();
    let records: Vec<PlayerRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawPlayer>(entry).ok())
        .filter_map(RawPlayer::into_record)
        .collect();
    if records.len() < total {
        warn!(
            "Dropped {} malformed upstream player entries",
            total - records.len()
        );
    }
    records
}

/// balldontlie players API client.
///
/// All requests, search and bulk alike, pass through one [`RateGate`].
pub struct BallDontLieClient {
    client: Client,
    config: UpstreamConfig,
    gate: RateGate,
}

impl BallDontLieClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, DashError> {
        let client = create_client(&config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: UpstreamConfig) -> Self {
        let gate = RateGate::new(config.min_spacing());
        Self {
            client,
            config,
            gate,
        }
    }

    async fn fetch_page(&self, params: &[(&str, String)]) -> Result<Vec<PlayerRecord>, DashError> {
        let api_key = self.config.api_key.as_deref().unwrap_or("");
        if api_key.is_empty() {
            return Err(DashError::Config("Upstream API key not configured".to_string()));
        }

        let url = self.config.players_url();
        let mut attempt = 0;

        loop {
            self.gate.acquire().await;
            debug!("GET {} {:?}", url, params);

            let sent = self
                .client
                .get(&url)
                .header(self.config.auth_header.as_str(), api_key)
                .query(params)
                .send()
                .await;

            match sent {
                Ok(response) => return self.read_page(response).await,
                Err(e) if attempt < self.config.retries && (e.is_timeout() || e.is_connect()) => {
                    attempt += 1;
                    warn!("Upstream request failed ({}), retry {}", e, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn read_page(&self, response: Response) -> Result<Vec<PlayerRecord>, DashError> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DashError::RateLimited);
        }

        let page = match serde_json::from_str::<Value>(&body) {
            Ok(page) => page,
            Err(_) => {
                if self.is_rate_limit_text(&body) {
                    return Err(DashError::RateLimited);
                }
                return Err(DashError::Upstream(body));
            }
        };

        if !status.is_success() {
            return Err(DashError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        Ok(page_records(page))
    }

    fn is_rate_limit_text(&self, body: &str) -> bool {
        let marker = self.config.rate_limit_marker.to_lowercase();
        !marker.is_empty() && body.to_lowercase().contains(&marker)
    }
}

#[async_trait]
impl PlayerService for BallDontLieClient {
    async fn search_players(&self, term: &str) -> Result<Vec<PlayerRecord>, DashError> {
        let params = [
            ("search", term.to_string()),
            ("per_page", self.config.search_page_size.to_string()),
        ];
        self.fetch_page(&params).await
    }

    async fn load_players(&self) -> Result<Vec<PlayerRecord>, DashError> {
        let params = [("per_page", self.config.seed_page_size.to_string())];
        self.fetch_page(&params).await
    }
}
