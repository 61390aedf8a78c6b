// src/cli/handlers/install.rs

//! `--install` mode.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::{core::paths::UserDirs, models::ShellFlavor, system::installer};

/// Installs the wrapper for `flavor` and reports what was written.
pub fn handle(flavor: ShellFlavor) -> Result<()> {
    let dirs = UserDirs::from_system()?;
    let report = installer::install(flavor, &dirs)
        .with_context(|| format!("Failed to install the envon bootstrap for {}", flavor.name()))?;

    println!("{}", "envon bootstrap installed:".green().bold());
    println!("- managed: {}", report.managed_file.display());
    if report.rc_updated {
        println!("- rc: {}", report.rc_file.display());
    } else {
        println!("- rc: {} (already set up)", report.rc_file.display());
    }
    println!(
        "Restart your shell or run: source {}",
        report.rc_file.display()
    );
    Ok(())
}
