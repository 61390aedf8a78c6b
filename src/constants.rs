// src/constants.rs

//! Fixed names shared across envon.

/// Directory names searched for a virtual environment, in priority order.
pub const PREFERRED_NAMES: [&str; 4] = [".venv", "venv", "env", ".env"];

/// The marker file written by `venv`/`virtualenv` at the root of every environment.
pub const MARKER_FILE: &str = "pyvenv.cfg";

/// Activation scripts whose presence also marks a directory as an environment.
pub const ACTIVATION_MARKERS: [&str; 6] = [
    "bin/activate",
    "bin/activate.fish",
    "bin/activate.csh",
    "bin/activate.nu",
    "Scripts/activate.bat",
    "Scripts/Activate.ps1",
];

/// The name of the directory holding envon's files (inside the user config dir).
pub const ENVON_DIR: &str = "envon";

/// The name of the optional configuration file (inside `ENVON_DIR`).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Opening marker of the block envon appends to a shell rc file.
pub const MARK_START: &str = "# >>> envon bootstrap >>>";

/// Closing marker of the block envon appends to a shell rc file.
pub const MARK_END: &str = "# <<< envon bootstrap <<<";

/// Directory holding named environments, shared with virtualenvwrapper.
pub const WORKON_HOME_VAR: &str = "WORKON_HOME";
/// Overrides the location of `config.toml`.
pub const CONFIG_PATH_VAR: &str = "ENVON_CONFIG";
/// `env_logger` filter for envon's diagnostics.
pub const LOG_FILTER_VAR: &str = "ENVON_LOG";
