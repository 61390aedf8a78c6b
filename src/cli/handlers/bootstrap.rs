// src/cli/handlers/bootstrap.rs

//! `--bootstrap` mode.

use anyhow::Result;

use crate::{models::ShellFlavor, system::bootstrap};

/// Prints the wrapper for `flavor` and nothing else.
pub fn handle(flavor: ShellFlavor) -> Result<()> {
    // The wrapper already ends with a newline; stdout must carry nothing else.
    print!("{}", bootstrap::bootstrap(flavor.shell()));
    Ok(())
}
