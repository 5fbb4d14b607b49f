mod cli;
mod config;
mod daemon;
mod error;
mod gitlab;
mod notes;
mod sync;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::gitlab::client::GitlabClient;
use crate::notes::store::NoteStore;
use crate::sync::Synchronizer;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse(&args)? {
        cli::Command::Help => {
            cli::print_help();
        }
        cli::Command::Sync => {
            let config = config::load_config()?;
            daemon::run_once(&synchronizer(&config)).await?;
        }
        cli::Command::Watch { interval_minutes } => {
            let config = config::load_config()?;
            let minutes = interval_minutes.unwrap_or(config.interval_minutes);
            daemon::run(&synchronizer(&config), minutes).await?;
        }
    }

    Ok(())
}

fn synchronizer(config: &Config) -> Synchronizer {
    let client = GitlabClient::new(
        config.base_url.clone(),
        config.token.clone(),
        config.username.clone(),
    );
    Synchronizer::new(Box::new(client), NoteStore::new(config.folder.clone()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
