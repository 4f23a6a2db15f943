use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nba-dashboard")]
#[command(about = "Backend for the NBA player search dashboard.")]
#[command(version)]
pub struct Cli {
    /// Port to listen on (overrides config and $PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Path to a config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Run a single search and exit instead of serving
    #[arg(short = 's', long, value_name = "NAME")]
    pub search: Option<String>,

    /// Output as JSON (with --search)
    #[arg(long)]
    pub json: bool,
}
