//! Actions behind each pile subcommand
//!
//! External tools run through a [`Runner`] and their failures are swallowed:
//! the user watches docker's own output, and pile still exits successfully.

use std::{path::Path, thread};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use crate::{
    config::{self, PileConfig, PileContext},
    docker::{self, APP_PROJECT, DB_PROJECT, PsColumn, compose::build_file_selectors},
    install::Installer,
    process::{Invocation, Runner, fire_and_forget},
};

/// Create the pile directory, the network definition and the example config
pub fn init(ctx: &PileContext) -> Result<()> {
    let pile_dir = ctx.ensure_pile_dir()?;
    println!("{} Created directory: {}", "✓".green(), pile_dir.display());

    for path in config::write_defaults(ctx)? {
        println!("{} Wrote {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Bring up the databases, wait, then bring up the apps
pub fn up(ctx: &PileContext, runner: &dyn Runner) -> Result<()> {
    let config = PileConfig::load(ctx).context("Failed to load pile configuration")?;
    println!("{} Apps: {}", "ℹ".blue(), config.apps.join(", "));

    if !config.dbs.is_empty() {
        println!("{} Databases: {}", "ℹ".blue(), config.dbs.join(", "));
        fire_and_forget(runner, &docker::compose_up(ctx, DB_PROJECT, &config.dbs));
        thread::sleep(ctx.stage_delay);
    }

    debug!(files = %build_file_selectors(&ctx.pile_dir, &config.apps), "starting apps");
    fire_and_forget(runner, &docker::compose_up(ctx, APP_PROJECT, &config.apps));
    Ok(())
}

/// Take down the apps, wait, then take down the databases
pub fn down(ctx: &PileContext, runner: &dyn Runner) -> Result<()> {
    let config = PileConfig::load(ctx).context("Failed to load pile configuration")?;

    fire_and_forget(runner, &docker::compose_down(ctx, APP_PROJECT, &config.apps));

    if !config.dbs.is_empty() {
        thread::sleep(ctx.stage_delay);
        fire_and_forget(runner, &docker::compose_down(ctx, DB_PROJECT, &config.dbs));
    }

    Ok(())
}

pub fn install(ctx: &PileContext, installer: &Installer, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        usage("Please specify a pile to install");
        return Ok(());
    };

    println!("{} Installing {}...", "ℹ".blue(), name.bright_white());
    let dest = installer
        .install(ctx, name)
        .with_context(|| format!("Failed to install {}", name))?;
    println!("{} Installed {} to {}", "✓".green(), name.bright_white(), dest.display());

    Ok(())
}

pub fn edit_config(ctx: &PileContext, runner: &dyn Runner) {
    edit(ctx, runner, &ctx.config_path());
}

pub fn edit_env(ctx: &PileContext, runner: &dyn Runner) {
    edit(ctx, runner, &ctx.env_path());
}

fn edit(ctx: &PileContext, runner: &dyn Runner, path: &Path) {
    // EDITOR may carry flags, e.g. "code --wait"
    let mut words = ctx.editor.split_whitespace();
    let Some(program) = words.next() else {
        return;
    };

    let invocation = Invocation::new(program)
        .args(words)
        .arg(path.display().to_string());
    fire_and_forget(runner, &invocation);
}

pub fn logs(runner: &dyn Runner, name: Option<&str>) {
    match name {
        Some(name) => {
            fire_and_forget(runner, &docker::logs(&docker::container_name(APP_PROJECT, name)))
        }
        None => usage("Please specify an app name"),
    }
}

pub fn logs_db(runner: &dyn Runner, name: Option<&str>) {
    match name {
        Some(name) => {
            fire_and_forget(runner, &docker::logs(&docker::container_name(DB_PROJECT, name)))
        }
        None => usage("Please specify a database name"),
    }
}

pub fn restart_app(runner: &dyn Runner, name: Option<&str>) {
    match name {
        Some(name) => {
            fire_and_forget(runner, &docker::restart(&docker::container_name(APP_PROJECT, name)))
        }
        None => usage("Please specify an app name"),
    }
}

pub fn ps(runner: &dyn Runner, column: PsColumn) {
    fire_and_forget(runner, &docker::ps(column));
}

fn usage(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}
