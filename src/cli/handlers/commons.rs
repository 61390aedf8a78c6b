// src/cli/handlers/commons.rs

//! Shared helpers used by the resolution handlers.

use anyhow::Result;
use dialoguer::{Select, theme::ColorfulTheme};
use std::{
    env,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    core::{
        config_loader::{self, Settings, SettingsEnv},
        discovery::{self, DiscoveryError},
        paths::UserDirs,
    },
    models::{ResolveOptions, ResolvedEnv, ShellFlavor},
    system::{
        installer,
        shell::{self, ShellEnv},
    },
};

/// Failures of the interactive candidate menu.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The user left the menu without choosing.
    #[error("Cancelled: no virtual environment selected.")]
    Cancelled,
    /// The terminal could not be driven.
    #[error("Failed to show the selection menu: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Loads the settings for this run from the real user directories and environment.
pub fn load_settings() -> Result<Settings> {
    let dirs = UserDirs::from_system()?;
    Ok(config_loader::load_settings(&dirs, &SettingsEnv::from_process())?)
}

/// Resolves `target` from the current directory. On ambiguity, asks the user to
/// pick one if `interactive` is set and a terminal is attached.
pub fn resolve_target(target: Option<&str>, settings: &Settings, interactive: bool) -> Result<ResolvedEnv> {
    let options = ResolveOptions {
        start_dir: env::current_dir()?,
        workon_home: settings.workon_home.clone(),
    };

    match discovery::resolve(target, &options) {
        Ok(resolved) => Ok(resolved),
        Err(DiscoveryError::AmbiguousCandidates {
            context,
            candidates,
        }) if interactive && can_prompt() => {
            let chosen = choose_interactively(&context, &candidates)?;
            Ok(ResolvedEnv::new(chosen))
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompting needs a human on stdin and somewhere to draw the menu. stdout is
/// not required: the wrappers capture it.
fn can_prompt() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Shows a selection menu (on stderr) listing the candidates.
fn choose_interactively(context: &Path, candidates: &[PathBuf]) -> Result<PathBuf, SelectionError> {
    let items: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    let prompt = format!(
        "Multiple virtual environments found in {}",
        context.display()
    );

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    picked(selection, candidates)
}

/// Maps a menu result to its candidate; no selection means the user cancelled.
fn picked(selection: Option<usize>, candidates: &[PathBuf]) -> Result<PathBuf, SelectionError> {
    selection
        .and_then(|index| candidates.get(index).cloned())
        .ok_or(SelectionError::Cancelled)
}

/// Silently brings an installed managed bootstrap up to date with this version.
///
/// Never fails the running command; problems are only logged.
pub fn refresh_managed_bootstrap(explicit: Option<ShellFlavor>) {
    let dirs = match UserDirs::from_system() {
        Ok(dirs) => dirs,
        Err(e) => {
            log::debug!("Skipping bootstrap refresh: {}", e);
            return;
        }
    };
    let configured = config_loader::load_settings(&dirs, &SettingsEnv::from_process())
        .ok()
        .and_then(|settings| settings.default_shell);
    let shell = shell::detect_shell(explicit, configured, &ShellEnv::from_process());

    match installer::refresh_if_installed(shell, &dirs) {
        Ok(true) => log::debug!("Refreshed managed bootstrap for {}", shell),
        Ok(false) => {}
        Err(e) => log::debug!("Skipping bootstrap refresh for {}: {}", shell, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<PathBuf> {
        vec![PathBuf::from("/proj/.venv"), PathBuf::from("/proj/venv")]
    }

    #[test]
    fn test_picked_returns_the_chosen_candidate() {
        assert_eq!(
            picked(Some(1), &candidates()).unwrap(),
            PathBuf::from("/proj/venv")
        );
    }

    #[test]
    fn test_leaving_the_menu_is_cancelled() {
        let err = picked(None, &candidates()).unwrap_err();
        assert!(matches!(err, SelectionError::Cancelled));
        assert!(err.to_string().starts_with("Cancelled"));
    }

    #[test]
    fn test_out_of_range_selection_is_cancelled() {
        assert!(matches!(
            picked(Some(7), &candidates()),
            Err(SelectionError::Cancelled)
        ));
    }
}
