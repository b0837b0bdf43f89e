//! CLI command definitions for pile
//!
//! This module contains all the clap-based command definitions and argument parsing.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pile")]
#[command(about = "Docker Compose Wrangler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create ~/pile with the shared network and an example config
    Init,
    /// Start the databases, then the apps listed in pile.config.yaml
    Up,
    /// Stop the apps, then the databases listed in pile.config.yaml
    Down,
    /// Install a service group from the pile library
    Install {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
    /// Edit pile.config.yaml
    Config,
    /// Edit the pile .env file
    Env,
    /// Follow the logs of an app container
    Logs {
        #[arg(value_name = "APP")]
        name: Option<String>,
    },
    /// Follow the logs of a database container
    LogsDb {
        #[arg(value_name = "DB")]
        name: Option<String>,
    },
    /// Restart an app container
    RestartApp {
        #[arg(value_name = "APP")]
        name: Option<String>,
    },
    /// Show running containers and their state
    #[command(visible_aliases = ["ps", "state"])]
    Status,
    /// Show running containers and their port mappings
    Ports,
    /// Show running containers and their images
    Images,
    /// Show running containers and their commands
    Commands,
}
