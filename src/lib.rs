//! Missed-prayer (qada) tracker: a ledger of owed prayers, makeup plans
//! drawn from it, and a dated log of prayers made up.
//!
//! All mutation goes through [`state::Store::dispatch`]; the CLI and the
//! dashboard only build commands and render the resulting state.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;
pub mod state;
pub mod tui;
pub mod utils;
