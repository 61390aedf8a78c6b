// src/system/installer.rs

//! Installs the bootstrap wrapper for a shell.

use crate::{
    constants::{MARK_END, MARK_START},
    core::paths::UserDirs,
    models::{Shell, ShellFlavor},
    system::bootstrap,
};
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors writing the managed file or the rc block.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Reading or writing a file failed.
    #[error("Filesystem Error: {0}")]
    Io(#[from] io::Error),
    /// The managed file could not be moved into place.
    #[error("Error with temporary file: {0}")]
    TempFile(#[from] tempfile::PersistError),
    /// The shell has no rc file to hook into.
    #[error("Installing the bootstrap is not supported for {0}; save the output of `envon --bootstrap cmd` as envon.bat on your PATH instead.")]
    Unsupported(Shell),
}

/// What `install` wrote, for reporting back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// The managed bootstrap file.
    pub managed_file: PathBuf,
    /// The rc file that sources it.
    pub rc_file: PathBuf,
    /// `false` if the rc file already had the envon block.
    pub rc_updated: bool,
}

/// The path of the managed bootstrap file for a shell (`<config>/envon/envon.<ext>`).
pub fn managed_bootstrap_path(shell: Shell, dirs: &UserDirs) -> Result<PathBuf, InstallError> {
    let name = match shell {
        Shell::Posix => "envon.bash",
        Shell::Fish => "envon.fish",
        Shell::Nushell => "envon.nu",
        Shell::PowerShell => "envon.ps1",
        Shell::Csh => "envon.csh",
        Shell::Cmd => return Err(InstallError::Unsupported(shell)),
    };
    Ok(dirs.envon_dir().join(name))
}

/// The rc/profile file a flavor reads at startup.
pub fn rc_path(flavor: ShellFlavor, dirs: &UserDirs) -> Result<PathBuf, InstallError> {
    let home = &dirs.home;
    let path = match flavor {
        ShellFlavor::Bash | ShellFlavor::Sh => {
            let bashrc = home.join(".bashrc");
            if bashrc.exists() {
                bashrc
            } else {
                home.join(".bash_profile")
            }
        }
        ShellFlavor::Zsh => home.join(".zshrc"),
        ShellFlavor::Fish => home.join(".config").join("fish").join("config.fish"),
        ShellFlavor::Nushell => {
            let base = if dirs.is_windows {
                dirs.config_base.clone()
            } else {
                home.join(".config")
            };
            base.join("nushell").join("config.nu")
        }
        ShellFlavor::Pwsh | ShellFlavor::Powershell => {
            let profile_dir = if !dirs.is_windows {
                home.join(".config").join("powershell")
            } else if flavor == ShellFlavor::Pwsh {
                dirs.documents.join("PowerShell")
            } else {
                dirs.documents.join("WindowsPowerShell")
            };
            profile_dir.join("Microsoft.PowerShell_profile.ps1")
        }
        ShellFlavor::Csh => home.join(".cshrc"),
        ShellFlavor::Tcsh => home.join(".tcshrc"),
        ShellFlavor::Cmd => return Err(InstallError::Unsupported(Shell::Cmd)),
    };
    Ok(path)
}

/// The managed file content: a version header followed by the wrapper.
pub fn managed_content(shell: Shell) -> String {
    format!(
        "# envon managed bootstrap - version: {}\n{}",
        env!("CARGO_PKG_VERSION"),
        bootstrap::bootstrap(shell)
    )
}

/// The marked block that makes an rc file source the managed file if it exists.
pub fn rc_block(shell: Shell, managed_file: &Path) -> Result<String, InstallError> {
    let mf = managed_file.to_string_lossy().replace('\\', "/");
    let body = match shell {
        Shell::Posix => format!("[ -f '{mf}' ] && . '{mf}'"),
        Shell::Fish => format!("if test -f '{mf}'\n    source '{mf}'\nend"),
        // Nushell's `source` needs a parse-time constant, so the file must exist.
        Shell::Nushell => format!("source '{mf}'"),
        Shell::PowerShell => format!(
            "$envonPath = '{}'\nif (Test-Path $envonPath) {{ . $envonPath }}",
            managed_file.display()
        ),
        Shell::Csh => format!("if ( -f '{mf}' ) source '{mf}'"),
        Shell::Cmd => return Err(InstallError::Unsupported(shell)),
    };
    Ok(format!("\n{MARK_START}\n{body}\n{MARK_END}\n"))
}

/// Installs the bootstrap for `flavor`: writes the managed file and makes the
/// rc file source it. Running it again leaves a single marked block.
pub fn install(flavor: ShellFlavor, dirs: &UserDirs) -> Result<InstallReport, InstallError> {
    let shell = flavor.shell();
    let managed_file = managed_bootstrap_path(shell, dirs)?;
    let rc_file = rc_path(flavor, dirs)?;

    write_if_changed(&managed_file, &managed_content(shell))?;
    let rc_updated = ensure_rc_sources_managed(&rc_file, &managed_file, shell)?;

    log::debug!(
        "Installed bootstrap: managed='{}', rc='{}', rc_updated={}",
        managed_file.display(),
        rc_file.display(),
        rc_updated
    );
    Ok(InstallReport {
        managed_file,
        rc_file,
        rc_updated,
    })
}

/// Rewrites the managed file for `shell` if it exists and is outdated.
///
/// Returns `Ok(true)` if the file was rewritten.
pub fn refresh_if_installed(shell: Shell, dirs: &UserDirs) -> Result<bool, InstallError> {
    let managed_file = managed_bootstrap_path(shell, dirs)?;
    if !managed_file.exists() {
        return Ok(false);
    }
    write_if_changed(&managed_file, &managed_content(shell))
}

/// Writes `content` to `path` atomically, only if the file is missing or differs.
fn write_if_changed(path: &Path, content: &str) -> Result<bool, InstallError> {
    if fs::read_to_string(path).is_ok_and(|current| current == content) {
        return Ok(false);
    }
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(path)?;
    Ok(true)
}

/// Appends the marked block to the rc file unless it is already there.
fn ensure_rc_sources_managed(
    rc_file: &Path,
    managed_file: &Path,
    shell: Shell,
) -> Result<bool, InstallError> {
    let current = match fs::read_to_string(rc_file) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    if current.contains(MARK_START) && current.contains(MARK_END) {
        return Ok(false);
    }

    let block = rc_block(shell, managed_file)?;
    if let Some(parent) = rc_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(rc_file)?;
    file.write_all(block.as_bytes())?;
    Ok(true)
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

    #[test]
    fn test_install_bash_writes_managed_file_and_rc_block() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());

        let report = install(ShellFlavor::Bash, &dirs).unwrap();
        assert_eq!(report.managed_file, tmp.path().join(".config/envon/envon.bash"));
        assert_eq!(report.rc_file, tmp.path().join(".bash_profile"));
        assert!(report.rc_updated);

        let managed = fs::read_to_string(&report.managed_file).unwrap();
        assert!(managed.starts_with("# envon managed bootstrap - version: "));
        assert!(managed.contains("envon() {"));

        let rc = fs::read_to_string(&report.rc_file).unwrap();
        assert!(rc.contains(MARK_START));
        assert!(rc.contains(MARK_END));
        assert!(rc.contains("envon.bash"));
    }

    #[test]
    fn test_install_prefers_existing_bashrc() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".bashrc"), "alias ll='ls -l'\n").unwrap();

        let report = install(ShellFlavor::Bash, &dirs_in(tmp.path())).unwrap();
        assert_eq!(report.rc_file, tmp.path().join(".bashrc"));
        let rc = fs::read_to_string(&report.rc_file).unwrap();
        assert!(rc.starts_with("alias ll='ls -l'\n"));
    }

    #[test]
    fn test_install_twice_keeps_a_single_block() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());

        install(ShellFlavor::Zsh, &dirs).unwrap();
        let second = install(ShellFlavor::Zsh, &dirs).unwrap();
        assert!(!second.rc_updated);

        let rc = fs::read_to_string(tmp.path().join(".zshrc")).unwrap();
        assert_eq!(rc.matches(MARK_START).count(), 1);
    }

    #[test]
    fn test_install_fish_creates_config_dir() {
        let tmp = TempDir::new().unwrap();
        let report = install(ShellFlavor::Fish, &dirs_in(tmp.path())).unwrap();
        assert_eq!(report.rc_file, tmp.path().join(".config/fish/config.fish"));
        let rc = fs::read_to_string(&report.rc_file).unwrap();
        assert!(rc.contains("source '"));
        assert!(rc.contains("envon.fish"));
    }

    #[test]
    fn test_install_cmd_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let err = install(ShellFlavor::Cmd, &dirs_in(tmp.path())).unwrap_err();
        assert!(matches!(err, InstallError::Unsupported(Shell::Cmd)));
    }

    #[test]
    fn test_rc_paths_per_flavor() {
        let root = Path::new("/home/u");
        let dirs = dirs_in(root);
        assert_eq!(rc_path(ShellFlavor::Tcsh, &dirs).unwrap(), root.join(".tcshrc"));
        assert_eq!(rc_path(ShellFlavor::Csh, &dirs).unwrap(), root.join(".cshrc"));
        assert_eq!(
            rc_path(ShellFlavor::Nushell, &dirs).unwrap(),
            root.join(".config/nushell/config.nu")
        );
        assert_eq!(
            rc_path(ShellFlavor::Pwsh, &dirs).unwrap(),
            root.join(".config/powershell/Microsoft.PowerShell_profile.ps1")
        );
    }

    #[test]
    fn test_windows_powershell_profiles() {
        let dirs = UserDirs {
            is_windows: true,
            ..dirs_in(Path::new("/home/u"))
        };
        assert_eq!(
            rc_path(ShellFlavor::Powershell, &dirs).unwrap(),
            PathBuf::from("/home/u/Documents/WindowsPowerShell/Microsoft.PowerShell_profile.ps1")
        );
        assert_eq!(
            rc_path(ShellFlavor::Pwsh, &dirs).unwrap(),
            PathBuf::from("/home/u/Documents/PowerShell/Microsoft.PowerShell_profile.ps1")
        );
    }

    #[test]
    fn test_refresh_only_touches_installed_and_outdated_files() {
        let tmp = TempDir::new().unwrap();
        let dirs = dirs_in(tmp.path());

        assert!(!refresh_if_installed(Shell::Fish, &dirs).unwrap());
        assert!(!managed_bootstrap_path(Shell::Fish, &dirs).unwrap().exists());

        let managed = managed_bootstrap_path(Shell::Fish, &dirs).unwrap();
        fs::create_dir_all(managed.parent().unwrap()).unwrap();
        fs::write(&managed, "# envon managed bootstrap - version: 0.0.0\nold\n").unwrap();

        assert!(refresh_if_installed(Shell::Fish, &dirs).unwrap());
        assert_eq!(fs::read_to_string(&managed).unwrap(), managed_content(Shell::Fish));
        assert!(!refresh_if_installed(Shell::Fish, &dirs).unwrap());
    }
}
