//! Maps the parsed flags to a mode and runs its handler.

use anyhow::Result;
use clap::CommandFactory;

use crate::{
    cli::{Cli, handlers},
    models::ShellFlavor,
};

/// The one thing an invocation does, decided from the parsed flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `--bootstrap SHELL`: print a wrapper, no filesystem access.
    Bootstrap(ShellFlavor),
    /// `--install SHELL`: write the managed wrapper and rc block.
    Install(ShellFlavor),
    /// `envon help`: print the help text.
    Help,
    /// `--print-path`: print the resolved environment path.
    PrintPath,
    /// Default: print the activation command.
    Activate,
}

impl Mode {
    /// Picks the mode. `--bootstrap` and `--install` win over everything else.
    pub fn from_cli(cli: &Cli) -> Self {
        if let Some(flavor) = cli.bootstrap {
            Self::Bootstrap(flavor)
        } else if let Some(flavor) = cli.install {
            Self::Install(flavor)
        } else if cli.target.as_deref() == Some("help") {
            Self::Help
        } else if cli.print_path {
            Self::PrintPath
        } else {
            Self::Activate
        }
    }
}

/// Routes a parsed command line to its handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let mode = Mode::from_cli(&cli);
    log::debug!("Dispatching {:?} for {:?}", mode, cli);

    if !matches!(mode, Mode::Install(_) | Mode::Help) {
        handlers::commons::refresh_managed_bootstrap(cli.emit);
    }

    match mode {
        Mode::Bootstrap(flavor) => handlers::bootstrap::handle(flavor),
        Mode::Install(flavor) => handlers::install::handle(flavor),
        Mode::Help => {
            Cli::command().print_help()?;
            Ok(())
        }
        Mode::PrintPath | Mode::Activate => handlers::activate::handle(&cli, mode == Mode::PrintPath),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn mode_of(args: &[&str]) -> Mode {
        let cli = Cli::try_parse_from(std::iter::once("envon").chain(args.iter().copied())).unwrap();
        Mode::from_cli(&cli)
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(mode_of(&[]), Mode::Activate);
        assert_eq!(mode_of(&["proj"]), Mode::Activate);
        assert_eq!(mode_of(&["--print-path"]), Mode::PrintPath);
        assert_eq!(mode_of(&["help"]), Mode::Help);
        assert_eq!(
            mode_of(&["--bootstrap", "zsh"]),
            Mode::Bootstrap(ShellFlavor::Zsh)
        );
        assert_eq!(
            mode_of(&["--install", "fish"]),
            Mode::Install(ShellFlavor::Fish)
        );
    }
}
