// src/cli/handlers/mod.rs

//! One module per invocation mode; shared helpers live in `commons`.

pub mod activate;
pub mod bootstrap;
pub mod commons;
pub mod install;
