//! Request handlers.

use crate::application::search::{search_players, MSG_NOT_FOUND};
use crate::application::status::health_report;
use crate::domain::model::{normalize_term, HealthReport, SearchResult, SearchSource};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// `GET /api/players/search` - the hybrid cache/local/remote path.
///
/// Always answers 200; failures are reported inside the envelope.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<NameQuery>,
) -> Json<SearchResult> {
    Json(search_players(&state, params.name.as_deref()).await)
}

/// `GET /api/players/lookup` - direct upstream passthrough with strict status codes.
pub async fn lookup(State(state): State<AppState>, Query(params): Query<NameQuery>) -> Response {
    let name = match params.name.as_deref() {
        Some(name) if !normalize_term(name).is_empty() => name,
        _ => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "Missing name"})))
                .into_response()
        }
    };

    match state.players.search_players(name).await {
        Ok(players) if players.is_empty() => Json(SearchResult::failed(
            name,
            MSG_NOT_FOUND,
            SearchSource::NotFound,
        ))
        .into_response(),
        Ok(players) => Json(SearchResult::found(name, players, SearchSource::Remote)).into_response(),
        Err(e) if e.is_rate_limited() => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "API rate limit exceeded"})),
        )
            .into_response(),
        Err(e) => {
            warn!("Error fetching player {:?}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "API request failed"})),
            )
                .into_response()
        }
    }
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(health_report(&state).await)
}
