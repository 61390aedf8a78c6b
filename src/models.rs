// src/models.rs

//! Data types shared across envon.

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

// --- SHELL MODELS ---

/// The shells envon knows how to activate an environment in.
///
/// Every per-shell table (activation scripts, command templates, bootstrap
/// wrappers) is an exhaustive `match` over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    /// bash, zsh, sh and other POSIX-compatible shells.
    Posix,
    /// fish.
    Fish,
    /// csh and tcsh.
    Csh,
    /// Nushell.
    Nushell,
    /// Windows PowerShell and PowerShell Core (`pwsh`).
    PowerShell,
    /// Windows `cmd.exe`.
    Cmd,
}

impl Shell {
    /// Every shell, in table order.
    pub const ALL: [Self; 6] = [
        Self::Posix,
        Self::Fish,
        Self::Csh,
        Self::Nushell,
        Self::PowerShell,
        Self::Cmd,
    ];

    /// The name passed back to the executable as `--emit <name>` by the wrappers.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::Posix => "bash",
            Self::Fish => "fish",
            Self::Csh => "csh",
            Self::Nushell => "nushell",
            Self::PowerShell => "powershell",
            Self::Cmd => "cmd",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// A concrete shell name as typed on the command line or in the config file.
///
/// Several flavors share one `Shell`, but they can differ in where their
/// rc file lives, which is why the installer works on flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[allow(missing_docs)]
pub enum ShellFlavor {
    Bash,
    Zsh,
    Sh,
    Fish,
    #[value(alias = "cshell")]
    Csh,
    Tcsh,
    #[value(alias = "nu")]
    Nushell,
    Pwsh,
    Powershell,
    #[value(aliases = ["batch", "bat"])]
    Cmd,
}

impl ShellFlavor {
    /// The shell family whose templates this flavor uses.
    pub fn shell(self) -> Shell {
        match self {
            Self::Bash | Self::Zsh | Self::Sh => Shell::Posix,
            Self::Fish => Shell::Fish,
            Self::Csh | Self::Tcsh => Shell::Csh,
            Self::Nushell => Shell::Nushell,
            Self::Pwsh | Self::Powershell => Shell::PowerShell,
            Self::Cmd => Shell::Cmd,
        }
    }

    /// The canonical CLI spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Sh => "sh",
            Self::Fish => "fish",
            Self::Csh => "csh",
            Self::Tcsh => "tcsh",
            Self::Nushell => "nushell",
            Self::Pwsh => "pwsh",
            Self::Powershell => "powershell",
            Self::Cmd => "cmd",
        }
    }

    /// Parses a flavor name case-insensitively, accepting the same aliases as the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

impl From<Shell> for ShellFlavor {
    /// The canonical flavor of each shell.
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Posix => Self::Bash,
            Shell::Fish => Self::Fish,
            Shell::Csh => Self::Csh,
            Shell::Nushell => Self::Nushell,
            Shell::PowerShell => Self::Powershell,
            Shell::Cmd => Self::Cmd,
        }
    }
}

// --- DISCOVERY MODELS ---

/// Inputs of a resolution run. Resolution reads nothing from the process
/// environment besides what is passed in here.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory the name-based search starts from (normally the CWD).
    /// Relative target paths are also interpreted against it.
    pub start_dir: PathBuf,
    /// Directory holding named environments (`WORKON_HOME`).
    pub workon_home: Option<PathBuf>,
}

/// A virtual environment directory that passed the marker check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnv {
    path: PathBuf,
}

impl ResolvedEnv {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The environment root.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// --- CONFIGURATION FILE MODEL ---

/// The on-disk shape of `config.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Fallback for `WORKON_HOME`. `~` and `$VARS` are expanded.
    pub workon_home: Option<String>,
    /// Shell flavor used when `--emit` is not given.
    pub default_shell: Option<String>,
    /// Set to `false` to never show the selection menu.
    pub interactive: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_names_parse_back() {
        for flavor in ShellFlavor::value_variants() {
            assert_eq!(ShellFlavor::parse(flavor.name()), Some(*flavor));
        }
    }

    #[test]
    fn test_flavor_aliases() {
        assert_eq!(ShellFlavor::parse("NU"), Some(ShellFlavor::Nushell));
        assert_eq!(ShellFlavor::parse("cshell"), Some(ShellFlavor::Csh));
        assert_eq!(ShellFlavor::parse("batch"), Some(ShellFlavor::Cmd));
        assert_eq!(ShellFlavor::parse("ksh"), None);
    }

    #[test]
    fn test_flavors_map_to_shells() {
        assert_eq!(ShellFlavor::Zsh.shell(), Shell::Posix);
        assert_eq!(ShellFlavor::Tcsh.shell(), Shell::Csh);
        assert_eq!(ShellFlavor::Pwsh.shell(), Shell::PowerShell);
        for shell in Shell::ALL {
            assert_eq!(ShellFlavor::from(shell).shell(), shell);
        }
    }
}
