use crate::domain::model::{PlayerRecord, TeamRecord};
use crate::state::AppState;
use tracing::{info, warn};

/// Fill the local index from the upstream bulk listing.
///
/// Never fails: an upstream error or an empty listing loads
/// [`fallback_players`] instead. Returns the number of records added.
pub async fn seed_index(state: &AppState) -> usize {
    info!("Initializing player database...");

    let players = match state.players.load_players().await {
        Ok(players) if !players.is_empty() => players,
        Ok(_) => {
            warn!("Upstream returned no players, loading fallback set");
            fallback_players()
        }
        Err(e) => {
            warn!("Could not load initial player data: {}", e);
            fallback_players()
        }
    };

    let added = state.index.merge(players).await;
    info!(
        "Loaded {} players into local database ({} total)",
        added,
        state.index.len().await
    );
    added
}

fn pacific_team(id: i64, full_name: &str, abbreviation: &str, city: &str) -> TeamRecord {
    TeamRecord {
        id,
        name: full_name.rsplit(' ').next().map(str::to_string),
        full_name: full_name.to_string(),
        abbreviation: abbreviation.to_string(),
        city: city.to_string(),
        conference: "West".to_string(),
        division: "Pacific".to_string(),
    }
}

fn fallback_player(
    id: i64,
    name: (&str, &str),
    position: &str,
    height: &str,
    weight: &str,
    jersey: &str,
    team: TeamRecord,
) -> PlayerRecord {
    let mut player = PlayerRecord::new(id, name.0, name.1);
    player.position = Some(position.to_string());
    player.height = Some(height.to_string());
    player.weight = Some(weight.to_string());
    player.jersey_number = Some(jersey.to_string());
    player.team = Some(team);
    player
}

/// Built-in players so the index is never empty.
pub fn fallback_players() -> Vec<PlayerRecord> {
    let lakers = pacific_team(14, "Los Angeles Lakers", "LAL", "Los Angeles");
    let warriors = pacific_team(10, "Golden State Warriors", "GSW", "Golden State");

    vec![
        fallback_player(237, ("LeBron", "James"), "F", "6-9", "250", "23", lakers),
        fallback_player(115, ("Stephen", "Curry"), "G", "6-2", "185", "30", warriors.clone()),
        fallback_player(246, ("Klay", "Thompson"), "G", "6-6", "220", "11", warriors),
    ]
}
