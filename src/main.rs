// Main entry point
use clap::Parser;
use nba_dashboard::application;
use nba_dashboard::infrastructure::config::{self, load_config};
use nba_dashboard::interfaces::cli::Cli;
use nba_dashboard::interfaces::http;
use nba_dashboard::presentation::card::format_result;
use nba_dashboard::state::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        let path = config::generate_config_sample(cli.config.as_deref())?;
        println!("Generated config file at: {}", path.display());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if config.upstream.api_key.is_none() {
        warn!(
            "No upstream API key configured (set {} or upstream.api_key); remote searches will fail",
            config::ENV_API_KEY
        );
    }

    let sweep_interval = config.cache.sweep_interval();
    let state = AppState::new(config)?;

    // One-shot query
    if let Some(name) = cli.search.as_deref() {
        application::seed::seed_index(&state).await;
        let result = application::search::search_players(&state, Some(name)).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{}", format_result(&result));
        }
        return Ok(());
    }

    // Seed in the background so the server answers immediately
    let seed_state = state.clone();
    tokio::spawn(async move {
        application::seed::seed_index(&seed_state).await;
    });

    let sweeper = state.cache.clone().spawn_sweeper(sweep_interval);

    info!("Health check: http://localhost:{}/api/health", state.config.server.port);
    http::start(state, shutdown_signal()).await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}
