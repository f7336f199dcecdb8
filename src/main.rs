mod cli;
mod clock;
mod config;
mod db;
mod error;
mod models;
mod performance;
mod planner;
mod study;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use clock::SystemClock;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;
    // Single source of "today" for the planner
    let clock = SystemClock;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // WAL so a CLI command can run while the dashboard is open
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    log::debug!("database ready at {:?}", db_path);

    match cli.command {
        // First-run prompts
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // Explicit subcommands, setup checked first
        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            match cmd {
                Commands::Plan { action } => {
                    handlers::handle_plan(&conn, &config, &action, &clock)?;
                }
                Commands::Marks { action } => {
                    handlers::handle_marks(&conn, &config, &action)?;
                }
                Commands::Summary { action } => {
                    handlers::handle_summary(&conn, &config, &action, &clock)?;
                }
                Commands::Resources { action } => {
                    handlers::handle_resources(&conn, &action)?;
                }
                Commands::Faculty { action } => {
                    handlers::handle_faculty(&conn, &config, &action)?;
                }
                Commands::Stats => {
                    handlers::handle_stats(&conn, &config, &clock)?;
                }
                Commands::Export { json } => {
                    handlers::handle_export(&conn, &config, json, &clock)?;
                }
                Commands::Setup { .. } => unreachable!(),
            }
        }

        // No subcommand → launch TUI
        None => {
            ensure_setup(&conn, &mut config)?;
            // Generation and reconciliation happen inside `run`
            tui::app::run(conn, config, Box::new(clock))?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run it first.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
