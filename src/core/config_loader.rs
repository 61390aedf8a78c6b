//! # Config Loader
//!
//! Builds the effective `Settings` for one invocation from three layers, in
//! increasing priority: the optional `config.toml`, environment variables,
//! and command-line flags (applied by the caller).
use crate::{
    constants::{CONFIG_PATH_VAR, WORKON_HOME_VAR},
    core::paths::{self, PathError, UserDirs},
    models::{ConfigFile, ShellFlavor},
};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors building the settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Could not read config file '{path}': {source}")]
    Read {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// What `toml` reported.
        #[source]
        source: toml::de::Error,
    },
    /// `default_shell` names no known shell.
    #[error("Unknown shell '{value}' for 'default_shell' in '{path}'.")]
    UnknownShell {
        /// The config file.
        path: PathBuf,
        /// The value as written.
        value: String,
    },
    /// A configured path could not be expanded.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// The effective settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Expanded workon-home directory, if any.
    pub workon_home: Option<PathBuf>,
    /// Shell used when `--emit` is absent.
    pub default_shell: Option<ShellFlavor>,
    /// Whether the selection menu may be shown.
    pub interactive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workon_home: None,
            default_shell: None,
            interactive: true,
        }
    }
}

/// The raw values of the environment variables that feed into `Settings`.
#[derive(Debug, Clone, Default)]
pub struct SettingsEnv {
    /// `$WORKON_HOME`, unexpanded.
    pub workon_home: Option<String>,
    /// `$ENVON_CONFIG`, unexpanded.
    pub config_path: Option<String>,
}

impl SettingsEnv {
    /// Reads the variables from the current process. Empty values count as unset.
    pub fn from_process() -> Self {
        Self {
            workon_home: env::var(WORKON_HOME_VAR).ok().filter(|v| !v.is_empty()),
            config_path: env::var(CONFIG_PATH_VAR).ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Reads `config.toml`. A missing file is not an error and yields the defaults.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config file at '{}'", path.display());
            return Ok(ConfigFile::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merges the config file and environment variables into `Settings`.
pub fn load_settings(dirs: &UserDirs, env: &SettingsEnv) -> Result<Settings, ConfigError> {
    let config_path = match &env.config_path {
        Some(custom) => paths::expand_path(custom)?,
        None => dirs.default_config_path(),
    };
    let file = read_config_file(&config_path)?;
    merge(file, env, &config_path)
}

fn merge(file: ConfigFile, env: &SettingsEnv, config_path: &Path) -> Result<Settings, ConfigError> {
    let workon_home = match (&env.workon_home, &file.workon_home) {
        (Some(from_env), _) => {
            log::debug!("WORKON_HOME taken from the environment");
            Some(paths::expand_path(from_env)?)
        }
        (None, Some(from_file)) => {
            log::debug!("workon_home taken from '{}'", config_path.display());
            Some(paths::expand_path(from_file)?)
        }
        (None, None) => None,
    };

    let default_shell = file
        .default_shell
        .map(|value| {
            ShellFlavor::parse(&value).ok_or_else(|| ConfigError::UnknownShell {
                path: config_path.to_path_buf(),
                value,
            })
        })
        .transpose()?;

    Ok(Settings {
        workon_home,
        default_shell,
        interactive: file.interactive.unwrap_or(true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs_in(root: &Path) -> UserDirs {
        UserDirs {
            home: root.to_path_buf(),
            config_base: root.join(".config"),
            documents: root.join("Documents"),
            is_windows: false,
        }
    }

    fn write_config(dirs: &UserDirs, content: &str) {
        fs::create_dir_all(dirs.envon_dir()).unwrap();
        fs::write(dirs.default_config_path(), content).unwrap();
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(&dirs_in(tmp.path()), &SettingsEnv::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_config_file_values() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        write_config(
            &dirs,
            "workon_home = \"/srv/envs\"\ndefault_shell = \"zsh\"\ninteractive = false\n",
        );

        let settings = load_settings(&dirs, &SettingsEnv::default()).unwrap();
        assert_eq!(settings.workon_home, Some(PathBuf::from("/srv/envs")));
        assert_eq!(settings.default_shell, Some(ShellFlavor::Zsh));
        assert!(!settings.interactive);
    }

    #[test]
    fn test_workon_home_env_beats_config_file() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        write_config(&dirs, "workon_home = \"/srv/envs\"\n");
        let env = SettingsEnv {
            workon_home: Some("/home/u/.virtualenvs".to_string()),
            config_path: None,
        };

        let settings = load_settings(&dirs, &env).unwrap();
        assert_eq!(
            settings.workon_home,
            Some(PathBuf::from("/home/u/.virtualenvs"))
        );
    }

    #[test]
    fn test_custom_config_path() {
        let tmp = TempDir::new().unwrap();
        let custom = tmp.path().join("custom.toml");
        fs::write(&custom, "default_shell = \"nu\"\n").unwrap();
        let env = SettingsEnv {
            workon_home: None,
            config_path: Some(custom.to_string_lossy().into_owned()),
        };

        let settings = load_settings(&dirs_in(tmp.path()), &env).unwrap();
        assert_eq!(settings.default_shell, Some(ShellFlavor::Nushell));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        write_config(&dirs, "workon = \"/srv/envs\"\n");

        let err = load_settings(&dirs, &SettingsEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_default_shell_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());
        write_config(&dirs, "default_shell = \"ksh93\"\n");

        let err = load_settings(&dirs, &SettingsEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownShell { ref value, .. } if value == "ksh93"));
    }
}
