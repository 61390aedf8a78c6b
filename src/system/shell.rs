// src/system/shell.rs

//! Shell selection.

use crate::models::{Shell, ShellFlavor};
use std::{env, path::Path};

/// The parts of the process environment that shell inference looks at.
#[derive(Debug, Clone, Default)]
pub struct ShellEnv {
    /// `$SHELL` (POSIX login shell).
    pub shell: Option<String>,
    /// `$PSModulePath`, set inside PowerShell sessions.
    pub ps_module_path: Option<String>,
    /// Whether envon runs on Windows.
    pub is_windows: bool,
}

impl ShellEnv {
    /// Captures the current process environment.
    pub fn from_process() -> Self {
        Self {
            shell: env::var("SHELL").ok().filter(|s| !s.is_empty()),
            ps_module_path: env::var("PSModulePath").ok().filter(|s| !s.is_empty()),
            is_windows: cfg!(target_os = "windows"),
        }
    }
}

/// Picks the shell to emit for.
///
/// Precedence: the explicit `--emit` flavor, then the configured default,
/// then inference from `env`.
pub fn detect_shell(
    explicit: Option<ShellFlavor>,
    configured: Option<ShellFlavor>,
    env: &ShellEnv,
) -> Shell {
    if let Some(flavor) = explicit {
        return flavor.shell();
    }
    if let Some(flavor) = configured {
        log::debug!("Using default_shell from config: {:?}", flavor);
        return flavor.shell();
    }
    let inferred = infer_shell(env);
    log::debug!("Inferred shell: {}", inferred);
    inferred
}

/// Guesses the calling shell from environment variables.
pub fn infer_shell(env: &ShellEnv) -> Shell {
    if env.is_windows {
        return if env.ps_module_path.is_some() {
            Shell::PowerShell
        } else {
            Shell::Cmd
        };
    }

    let Some(shell_var) = env.shell.as_deref() else {
        return Shell::Posix;
    };
    let program = Path::new(shell_var)
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let program = program.strip_suffix(".exe").unwrap_or(&program);

    match ShellFlavor::parse(program) {
        Some(flavor) => flavor.shell(),
        None => Shell::Posix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix_env(shell: &str) -> ShellEnv {
        ShellEnv {
            shell: Some(shell.to_string()),
            ps_module_path: None,
            is_windows: false,
        }
    }

    #[test]
    fn test_explicit_shell_wins() {
        let env = posix_env("/usr/bin/fish");
        let shell = detect_shell(Some(ShellFlavor::Zsh), Some(ShellFlavor::Tcsh), &env);
        assert_eq!(shell, Shell::Posix);
    }

    #[test]
    fn test_configured_shell_beats_inference() {
        let env = posix_env("/usr/bin/fish");
        let shell = detect_shell(None, Some(ShellFlavor::Nushell), &env);
        assert_eq!(shell, Shell::Nushell);
    }

    #[test]
    fn test_posix_inference_from_shell_basename() {
        let cases = [
            ("/bin/bash", Shell::Posix),
            ("/usr/bin/zsh", Shell::Posix),
            ("/usr/local/bin/fish", Shell::Fish),
            ("/bin/tcsh", Shell::Csh),
            ("/bin/csh", Shell::Csh),
            ("/home/u/.cargo/bin/nu", Shell::Nushell),
            ("/usr/bin/pwsh", Shell::PowerShell),
            ("/opt/gnu/bin/bash", Shell::Posix),
            ("/usr/bin/unknown-shell", Shell::Posix),
        ];
        for (shell_var, expected) in cases {
            assert_eq!(infer_shell(&posix_env(shell_var)), expected, "{shell_var}");
        }
    }

    #[test]
    fn test_posix_inference_without_shell_var() {
        assert_eq!(infer_shell(&ShellEnv::default()), Shell::Posix);
    }

    #[test]
    fn test_windows_inference() {
        let powershell = ShellEnv {
            shell: None,
            ps_module_path: Some(r"C:\Program Files\WindowsPowerShell\Modules".to_string()),
            is_windows: true,
        };
        assert_eq!(infer_shell(&powershell), Shell::PowerShell);

        let cmd = ShellEnv {
            is_windows: true,
            ..ShellEnv::default()
        };
        assert_eq!(infer_shell(&cmd), Shell::Cmd);
    }
}
