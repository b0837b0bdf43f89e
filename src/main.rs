//! pile - Docker Compose Wrangler
//!
//! Manages a pile of docker compose service groups under ~/pile: aggregates
//! their compose files for `up`/`down`, installs groups from the pile library
//! and wraps a few `docker ps`/`docker logs` shortcuts.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod docker;
mod error;
mod install;
mod logging;
mod process;

use cli::{Cli, Commands};
use config::PileContext;
use docker::PsColumn;
use install::Installer;
use process::SystemRunner;

fn main() -> Result<()> {
    logging::init_logger();

    let cli = Cli::parse();
    let runner = SystemRunner;

    // Only commands that touch the pile directory need it resolved
    match cli.command {
        Commands::Init => {
            commands::init(&PileContext::from_env()?)?;
        }
        Commands::Up => {
            commands::up(&PileContext::from_env()?, &runner)?;
        }
        Commands::Down => {
            commands::down(&PileContext::from_env()?, &runner)?;
        }
        Commands::Install { name } => {
            commands::install(&PileContext::from_env()?, &Installer::default(), name.as_deref())?;
        }
        Commands::Config => commands::edit_config(&PileContext::from_env()?, &runner),
        Commands::Env => commands::edit_env(&PileContext::from_env()?, &runner),
        Commands::Logs { name } => commands::logs(&runner, name.as_deref()),
        Commands::LogsDb { name } => commands::logs_db(&runner, name.as_deref()),
        Commands::RestartApp { name } => commands::restart_app(&runner, name.as_deref()),
        Commands::Status => commands::ps(&runner, PsColumn::State),
        Commands::Ports => commands::ps(&runner, PsColumn::Ports),
        Commands::Images => commands::ps(&runner, PsColumn::Image),
        Commands::Commands => commands::ps(&runner, PsColumn::Command),
    }

    Ok(())
}
