//! envon finds the Python virtual environment a project uses and prints the
//! command that activates it in the calling shell.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
