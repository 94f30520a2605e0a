use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rusqlite::Connection;

use qada::cli::args::{Cli, Commands};
use qada::cli::handlers;
use qada::config::AppConfig;
use qada::db::run_migrations;
use qada::tui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    debug!("opening {:?}", db_path);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Missed { action }) => handlers::handle_missed(&conn, &config, &action)?,
        Some(Commands::Plan { action }) => handlers::handle_plan(&conn, &config, &action)?,
        Some(Commands::Progress { range, since }) => {
            handlers::handle_progress(&conn, &config, range.as_deref(), since.as_deref())?
        }
        Some(Commands::Overview) => handlers::handle_overview(&conn)?,
        Some(Commands::Export) => handlers::handle_export(&conn)?,
        // No subcommand → launch the dashboard
        None => tui::run(conn, config)?,
    }

    Ok(())
}
