//! Command-line surface.

use crate::models::ShellFlavor;
use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// envon: activate the nearest or specified Python virtual environment.
///
/// Without a target, envon looks for `.venv`, `venv`, `env` or `.env` in the
/// current directory and its parents. A target may be an environment, a
/// project directory containing environments, or a name inside WORKON_HOME.
///
/// envon prints the activation command for your shell. Install the bootstrap
/// wrapper (`envon --install SHELL`) to make `envon` activate directly.
#[derive(Parser, Debug)]
#[command(
    name = "envon",
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Path, project root, or name (searched in WORKON_HOME).
    pub target: Option<String>,

    /// Force the shell output format instead of inferring it.
    #[arg(long, value_name = "SHELL")]
    pub emit: Option<ShellFlavor>,

    /// Print the resolved environment path instead of an activation command.
    #[arg(long)]
    pub print_path: bool,

    /// Print a shell wrapper that evaluates envon's output, so `envon` activates directly.
    #[arg(
        long,
        value_name = "SHELL",
        conflicts_with_all = ["install", "print_path", "target"]
    )]
    pub bootstrap: Option<ShellFlavor>,

    /// Install the bootstrap wrapper into the shell's configuration file.
    #[arg(long, value_name = "SHELL", conflicts_with_all = ["print_path", "target"])]
    pub install: Option<ShellFlavor>,

    /// Never prompt when several environments match; list them and fail instead.
    #[arg(long)]
    pub no_interactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("envon").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args() {
        let cli = parse(&[]).unwrap();
        assert!(cli.target.is_none());
        assert!(cli.emit.is_none());
        assert!(!cli.print_path);
        assert!(cli.bootstrap.is_none());
        assert!(cli.install.is_none());
    }

    #[test]
    fn test_target_and_flags() {
        let cli = parse(&["myproject", "--emit", "fish", "--print-path"]).unwrap();
        assert_eq!(cli.target.as_deref(), Some("myproject"));
        assert_eq!(cli.emit, Some(ShellFlavor::Fish));
        assert!(cli.print_path);
    }

    #[test]
    fn test_shell_aliases() {
        assert_eq!(parse(&["--emit", "nu"]).unwrap().emit, Some(ShellFlavor::Nushell));
        assert_eq!(parse(&["--emit", "bat"]).unwrap().emit, Some(ShellFlavor::Cmd));
        assert_eq!(
            parse(&["--bootstrap", "cshell"]).unwrap().bootstrap,
            Some(ShellFlavor::Csh)
        );
    }

    #[test]
    fn test_double_dash_separator() {
        let cli = parse(&["--emit", "bash", "--", "-odd-name"]).unwrap();
        assert_eq!(cli.target.as_deref(), Some("-odd-name"));
    }

    #[test]
    fn test_unknown_shell_is_rejected() {
        assert!(parse(&["--emit", "ksh93"]).is_err());
    }

    #[test]
    fn test_bootstrap_conflicts_with_target() {
        let err = parse(&["--bootstrap", "bash", "myenv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
