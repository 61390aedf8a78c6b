// src/system/activation.rs

//! Activation commands per shell.

use crate::models::Shell;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors building an activation command.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActivationError {
    /// The environment has no script for the requested shell.
    #[error("No activation script found for shell '{shell}' in '{}'.", .venv.display())]
    ActivationScriptMissing {
        /// The requested shell.
        shell: Shell,
        /// The environment root.
        venv: PathBuf,
    },
}

/// Activation scripts for a shell, relative to the environment root, in lookup order.
///
/// The first entry is the layout `venv`/`virtualenv` produce on the platform the
/// shell is native to; later entries cover cross-platform layouts (Git Bash on a
/// Windows venv, PowerShell Core on a POSIX venv).
pub fn script_candidates(shell: Shell) -> &'static [&'static str] {
    match shell {
        Shell::Posix => &["bin/activate", "Scripts/activate"],
        Shell::Fish => &["bin/activate.fish", "Scripts/activate.fish"],
        Shell::Csh => &["bin/activate.csh"],
        Shell::Nushell => &["bin/activate.nu", "Scripts/activate.nu"],
        Shell::PowerShell => &["Scripts/Activate.ps1", "bin/activate.ps1"],
        Shell::Cmd => &["Scripts/activate.bat"],
    }
}

/// Finds the activation script for `shell` inside `venv`.
pub fn find_activation_script(venv: &Path, shell: Shell) -> Result<PathBuf, ActivationError> {
    script_candidates(shell)
        .iter()
        .map(|relative| relative.split('/').fold(venv.to_path_buf(), |path, part| path.join(part)))
        .find(|script| script.is_file())
        .ok_or_else(|| ActivationError::ActivationScriptMissing {
            shell,
            venv: venv.to_path_buf(),
        })
}

/// Builds the one-line command that activates `venv` in `shell`.
///
/// The returned string is the complete command: wrappers evaluate it verbatim.
pub fn emit(venv: &Path, shell: Shell) -> Result<String, ActivationError> {
    let script = find_activation_script(venv, shell)?;
    let command = render_command(&script, shell);
    log::debug!("Activation command for {}: {}", shell, command);
    Ok(command)
}

/// Formats the invocation of an activation script for a shell.
pub fn render_command(script: &Path, shell: Shell) -> String {
    match shell {
        Shell::Posix => format!(". {}", quote_posix(&as_posix(script))),
        Shell::Fish => format!("source {}", quote_fish(&as_posix(script))),
        Shell::Csh => format!("source {}", quote_posix(&as_posix(script))),
        Shell::Nushell => format!("overlay use {}", quote_nushell(&as_posix(script))),
        Shell::PowerShell => format!(". {}", quote_powershell(&as_posix(script))),
        Shell::Cmd => format!("call \"{}\"", script.display()),
    }
}

/// The path with forward slashes, the form every non-cmd shell accepts on every platform.
fn as_posix(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}

/// Single-quotes a string for POSIX shells and csh, closing and reopening the
/// quotes around any embedded `'`.
fn quote_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn quote_fish(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn quote_powershell(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Nushell single-quoted strings have no escapes; fall back to a backtick string.
fn quote_nushell(value: &str) -> String {
    if value.contains('\'') {
        format!("`{}`", value)
    } else {
        format!("'{}'", value)
    }
}
