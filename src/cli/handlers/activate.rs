// src/cli/handlers/activate.rs

//! Default and `--print-path` modes.

use anyhow::Result;

use super::commons;
use crate::{
    cli::Cli,
    system::{
        activation,
        shell::{self, ShellEnv},
    },
};

/// Resolves the target and prints either its path or its activation command.
pub fn handle(cli: &Cli, print_path: bool) -> Result<()> {
    let settings = commons::load_settings()?;
    let interactive = settings.interactive && !cli.no_interactive;

    let resolved = commons::resolve_target(cli.target.as_deref(), &settings, interactive)?;
    log::debug!("Resolved environment: {}", resolved.path().display());

    if print_path {
        println!("{}", resolved.path().display());
        return Ok(());
    }

    let shell = shell::detect_shell(cli.emit, settings.default_shell, &ShellEnv::from_process());
    let command = activation::emit(resolved.path(), shell)?;
    println!("{}", command);
    Ok(())
}
