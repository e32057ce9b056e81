mod backup;
mod cli;
mod config;
mod error;
mod history;
mod messages;
mod model;
mod scan;
mod state;
mod style;
mod symlink;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use state::Session;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_cli(&cli)?;
    tracing::debug!(?config, "resolved configuration");

    let mut session = Session::start(&config, &cli.targets)?;
    ui::run(&mut session)?;

    if let Some(farewell) = session.farewell() {
        println!("{farewell}");
    }
    Ok(())
}
