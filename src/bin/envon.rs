// src/bin/envon.rs

//! The `envon` executable.

use clap::Parser;
use colored::*;
use envon::{
    cli::{Cli, dispatcher},
    constants::LOG_FILTER_VAR,
};

/// The main entry point of the `envon` application.
/// It sets up logging, parses arguments, dispatches to the handler for the
/// requested mode, and performs centralized error handling.
fn main() {
    // Logs go to stderr, so they never end up in the evaluated stdout line.
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_FILTER_VAR, "warn"))
        .init();

    if let Err(e) = dispatcher::dispatch(Cli::parse()) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
