// src/core/paths.rs

//! Locations of user directories and path expansion.

use crate::constants::{CONFIG_FILENAME, ENVON_DIR};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Errors locating or expanding paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform reported no home directory.
    #[error("Could not find the home directory.")]
    HomeDirNotFound,
    /// A `$VAR` in the path is unset or not unicode.
    #[error("Failed to expand path '{template}': {message}")]
    Expansion {
        /// The path as written.
        template: String,
        /// What `shellexpand` reported.
        message: String,
    },
}

/// The user directories envon reads from and writes to.
///
/// Everything location-dependent takes this struct instead of asking the
/// system, so tests can point it at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirs {
    /// The user's home directory.
    pub home: PathBuf,
    /// `%APPDATA%` on Windows, `$XDG_CONFIG_HOME` or `~/.config` elsewhere.
    pub config_base: PathBuf,
    /// The user's Documents folder, where Windows PowerShell keeps its profile.
    pub documents: PathBuf,
    /// Whether Windows locations apply.
    pub is_windows: bool,
}

impl UserDirs {
    /// Reads the directories of the current user and platform.
    pub fn from_system() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        let is_windows = cfg!(target_os = "windows");
        let config_base = if is_windows {
            non_empty_var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join("AppData").join("Roaming"))
        } else {
            non_empty_var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".config"))
        };
        let documents = dirs::document_dir().unwrap_or_else(|| home.join("Documents"));
        Ok(Self {
            home,
            config_base,
            documents,
            is_windows,
        })
    }

    /// `<config_base>/envon`
    pub fn envon_dir(&self) -> PathBuf {
        self.config_base.join(ENVON_DIR)
    }

    /// `<config_base>/envon/config.toml`
    pub fn default_config_path(&self) -> PathBuf {
        self.envon_dir().join(CONFIG_FILENAME)
    }
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a path.
pub fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
