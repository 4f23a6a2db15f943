//! Search orchestration: cache, local index, upstream fallback and error normalization.

mod common;

use common::{player, seeded_state, seeded_state_with_ttl, MockPlayers, Scripted};
use nba_dashboard::application::search::{
    search_players, MSG_MISSING_NAME, MSG_NOT_FOUND, MSG_RATE_LIMITED, MSG_UNAVAILABLE,
};
use nba_dashboard::domain::model::SearchSource;
use std::time::Duration;

#[tokio::test]
async fn test_empty_query_makes_no_downstream_calls() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    for raw in [None, Some(""), Some("   ")] {
        let result = search_players(&state, raw).await;
        assert_eq!(result.results, 0);
        assert!(result.response.is_empty());
        assert_eq!(result.errors, vec![MSG_MISSING_NAME.to_string()]);
        assert_eq!(result.source, SearchSource::Error);
    }

    assert_eq!(mock.search_calls(), 0);
    assert!(state.cache.is_empty());
}

#[tokio::test]
async fn test_lebron_found_locally_in_fallback_set() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    let result = search_players(&state, Some("LeBron")).await;

    assert_eq!(result.source, SearchSource::Local);
    assert_eq!(result.results, 1);
    let lebron = &result.response[0];
    assert_eq!(lebron.first_name, "LeBron");
    assert_eq!(lebron.last_name, "James");
    assert_eq!(lebron.team.as_ref().unwrap().abbreviation, "LAL");
    assert_eq!(result.parameters.search, "LeBron");
    assert_eq!(mock.search_calls(), 0);
}

#[tokio::test]
async fn test_any_token_order_matches_locally() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    for query in ["Stephen Curry", "curry stephen", "CURRY", "steph", "  Curry  "] {
        let result = search_players(&state, Some(query)).await;
        assert!(
            matches!(result.source, SearchSource::Local | SearchSource::Cache),
            "unexpected source for {:?}: {:?}",
            query,
            result.source
        );
        assert!(result.response.iter().any(|p| p.id == 115), "{:?}", query);
    }
    assert_eq!(mock.search_calls(), 0);
}

#[tokio::test]
async fn test_second_identical_query_is_served_from_cache() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    let first = search_players(&state, Some("curry")).await;
    let second = search_players(&state, Some("curry")).await;

    assert_eq!(first.source, SearchSource::Local);
    assert_eq!(second.source, SearchSource::Cache);
    assert_eq!(
        serde_json::to_string(&first.response).unwrap(),
        serde_json::to_string(&second.response).unwrap()
    );
    assert_eq!(first.parameters, second.parameters);
    assert_eq!(first.results, second.results);
    assert_eq!(first.errors, second.errors);
}

#[tokio::test]
async fn test_cache_key_is_normalized() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    search_players(&state, Some("Klay")).await;
    let again = search_players(&state, Some("  KLAY ")).await;

    assert_eq!(again.source, SearchSource::Cache);
    assert_eq!(state.cache.len(), 1);
    assert!(state.cache.get("klay").is_some());
}

#[tokio::test]
async fn test_cache_hit_short_circuits_remote() {
    let mock = MockPlayers::new();
    mock.push(Scripted::Players(vec![player(3, "Kevin", "Durant")]));
    let state = seeded_state(mock.clone()).await;

    let first = search_players(&state, Some("Durant")).await;
    let second = search_players(&state, Some("Durant")).await;

    assert_eq!(first.source, SearchSource::Remote);
    assert_eq!(second.source, SearchSource::Cache);
    assert_eq!(mock.search_calls(), 1);
}

#[tokio::test]
async fn test_expired_cache_entry_reexecutes_search() {
    let mock = MockPlayers::new();
    let state = seeded_state_with_ttl(mock.clone(), Duration::from_millis(50)).await;

    let first = search_players(&state, Some("curry")).await;
    assert_eq!(first.source, SearchSource::Local);
    assert_eq!(search_players(&state, Some("curry")).await.source, SearchSource::Cache);

    tokio::time::sleep(Duration::from_millis(120)).await;

    let after = search_players(&state, Some("curry")).await;
    assert_eq!(after.source, SearchSource::Local);
}

#[tokio::test]
async fn test_remote_results_are_merged_into_index() {
    let mock = MockPlayers::new();
    mock.push(Scripted::Players(vec![
        player(57, "Giannis", "Antetokounmpo"),
        player(237, "LeBron", "James"),
    ]));
    let state = seeded_state(mock.clone()).await;
    let before = state.index.len().await;

    let result = search_players(&state, Some("Antetokounmpo")).await;

    assert_eq!(result.source, SearchSource::Remote);
    assert_eq!(result.results, 2);
    // LeBron was already present
    assert_eq!(state.index.len().await, before + 1);
    assert!(state.index.contains(57).await);

    // A different phrasing now resolves locally
    let local = search_players(&state, Some("giannis")).await;
    assert_eq!(local.source, SearchSource::Local);
    assert_eq!(mock.search_calls(), 1);
}

#[tokio::test]
async fn test_remote_receives_raw_query() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    search_players(&state, Some("  Luka Doncic ")).await;

    assert_eq!(mock.terms(), vec!["  Luka Doncic ".to_string()]);
}

#[tokio::test]
async fn test_not_found_is_reported_and_not_cached() {
    let mock = MockPlayers::new();
    let state = seeded_state(mock.clone()).await;

    let first = search_players(&state, Some("Nobody Atall")).await;
    let second = search_players(&state, Some("Nobody Atall")).await;

    assert_eq!(first.source, SearchSource::NotFound);
    assert_eq!(first.errors, vec![MSG_NOT_FOUND.to_string()]);
    assert_eq!(first.results, 0);
    assert_eq!(second.source, SearchSource::NotFound);
    assert_eq!(mock.search_calls(), 2);
    assert!(state.cache.is_empty());
}

#[tokio::test]
async fn test_rate_limited_is_reported_and_retried_next_time() {
    let mock = MockPlayers::new();
    mock.push(Scripted::RateLimited);
    mock.push(Scripted::Players(vec![player(140, "Luka", "Doncic")]));
    let state = seeded_state(mock.clone()).await;

    let limited = search_players(&state, Some("Doncic")).await;
    assert_eq!(limited.source, SearchSource::RateLimited);
    assert_eq!(limited.errors, vec![MSG_RATE_LIMITED.to_string()]);
    assert!(state.cache.is_empty());

    let retried = search_players(&state, Some("Doncic")).await;
    assert_eq!(retried.source, SearchSource::Remote);
    assert_eq!(mock.search_calls(), 2);
}

#[tokio::test]
async fn test_upstream_error_is_normalized() {
    let mock = MockPlayers::new();
    mock.push(Scripted::Upstream("<html>Bad Gateway</html>"));
    let state = seeded_state(mock.clone()).await;

    let result = search_players(&state, Some("Tatum")).await;

    assert_eq!(result.source, SearchSource::Error);
    assert_eq!(result.errors, vec![MSG_UNAVAILABLE.to_string()]);
    assert!(!result.errors[0].contains("Bad Gateway"));
    assert!(state.cache.is_empty());
}

#[tokio::test]
async fn test_envelope_serializes_with_snake_case_source() {
    let mock = MockPlayers::new();
    mock.push(Scripted::RateLimited);
    let state = seeded_state(mock).await;

    let result = search_players(&state, Some("Jokic")).await;
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["get"], "players");
    assert_eq!(json["parameters"]["search"], "Jokic");
    assert_eq!(json["results"], 0);
    assert_eq!(json["source"], "rate_limited");
    assert!(json["response"].as_array().unwrap().is_empty());
}
