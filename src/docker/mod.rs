//! Docker command builders
//!
//! This module builds the `docker` invocations used by the pile commands:
//! - compose stages for `up` and `down`
//! - `docker ps` tables, logs and restarts for the shortcut commands

pub mod compose;

use crate::{config::PileContext, process::Invocation};

use compose::ComposeFiles;

/// Compose project holding the application services
pub const APP_PROJECT: &str = "pile";

/// Compose project holding the database services
pub const DB_PROJECT: &str = "pile-db";

/// Columns shown next to the container name by the `docker ps` shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsColumn {
    State,
    Image,
    Ports,
    Command,
}

impl PsColumn {
    fn placeholder(self) -> &'static str {
        match self {
            PsColumn::State => "{{.State}}",
            PsColumn::Image => "{{.Image}}",
            PsColumn::Ports => "{{.Ports}}",
            PsColumn::Command => "{{.Command}}",
        }
    }
}

/// `docker compose -p <project> -f <network> -f <service>... <action>`
pub fn compose(ctx: &PileContext, project: &str, services: &[String], action: &[&str]) -> Invocation {
    let files = ComposeFiles::for_services(&ctx.pile_dir, services).with_leading(ctx.network_path());

    Invocation::new("docker")
        .args(["compose", "-p", project])
        .args(files.args())
        .args(action.iter().copied())
}

pub fn compose_up(ctx: &PileContext, project: &str, services: &[String]) -> Invocation {
    compose(ctx, project, services, &["up", "-d", "--remove-orphans"])
}

pub fn compose_down(ctx: &PileContext, project: &str, services: &[String]) -> Invocation {
    compose(ctx, project, services, &["down"])
}

/// Container name Docker Compose gives the first replica of a service
pub fn container_name(project: &str, service: &str) -> String {
    format!("{}-{}-1", project, service)
}

pub fn ps(column: PsColumn) -> Invocation {
    Invocation::new("docker").args([
        "ps".to_string(),
        "--no-trunc".to_string(),
        "--format".to_string(),
        format!("table {{{{.Names}}}}\t{}", column.placeholder()),
    ])
}

pub fn logs(container: &str) -> Invocation {
    Invocation::new("docker").args(["logs", "-f", container])
}

pub fn restart(container: &str) -> Invocation {
    Invocation::new("docker").args(["restart", container])
}
