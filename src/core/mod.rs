// src/core/mod.rs

//! Filesystem-facing logic that does not depend on the calling shell.

pub mod config_loader;
pub mod discovery;
pub mod paths;
