use crate::domain::model::HealthReport;
use crate::state::AppState;

pub async fn health_report(state: &AppState) -> HealthReport {
    state.cache.purge_expired();

    HealthReport {
        status: "healthy".to_string(),
        players_in_database: state.index.len().await,
        cache_size: state.cache.len(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: chrono::Utc::now(),
    }
}
