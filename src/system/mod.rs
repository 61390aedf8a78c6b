//! # System Interaction Layer
//!
//! Everything that knows about particular shells lives here, as the boundary
//! between environment discovery and the shell that evaluates envon's output.
//!
//! ## Modules
//!
//! - **`activation`**: maps a resolved environment and a shell to the one-line
//!   command that activates it.
//! - **`bootstrap`**: the fixed wrapper definitions that make `envon` activate
//!   directly instead of printing a command.
//! - **`installer`**: writes the managed bootstrap file and hooks it into the
//!   user's rc file.
//! - **`shell`**: infers the calling shell from the process environment.

pub mod activation;
pub mod bootstrap;
pub mod installer;
pub mod shell;
