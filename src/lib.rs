//! rWorkday library root.
//! Exposes the CLI parser, the high-level run() function, and the tracker core.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::commands::{self, Now};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::timesheet::Action;
use crate::errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, now: Now) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Day { action } => commands::day::handle(action, cfg, now),
        Commands::Status { date, watch, ticks } => {
            commands::status::handle(date.as_deref(), *watch, *ticks, cfg, now)
        }
        Commands::Start { date } => {
            commands::transition::handle(Action::Start, date.as_deref(), cfg, now)
        }
        Commands::Pause { date } => {
            commands::transition::handle(Action::Pause, date.as_deref(), cfg, now)
        }
        Commands::Finish { date } => {
            commands::transition::handle(Action::Finish, date.as_deref(), cfg, now)
        }
        Commands::Task { action } => commands::task::handle(action, cfg, now),
        Commands::Evidence { action } => commands::evidence::handle(action, cfg, now),
        Commands::List { period } => commands::list::handle(period.as_deref(), cfg, now),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg, now),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // A broken config file must not lock the user out of fixing it.
    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) if matches!(cli.command, Commands::Init | Commands::Config { .. }) => {
            ui::messages::warning(format!("{e}; using defaults"));
            Config::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    cfg.database = utils::path::expand_tilde(&cfg.database)
        .to_string_lossy()
        .to_string();

    logging::init(&cfg.log_level);

    let now = Now::from_arg(cli.now.as_ref())?;
    tracing::debug!(db = %cfg.database, fixed_now = cli.now.is_some(), "starting");

    dispatch(&cli, &cfg, now)
}
