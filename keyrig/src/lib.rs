//! keyrig CLI library
//!
//! Command implementations shared by the `keyrig` binary and its tests.

pub mod cli;
pub mod commands;
pub mod utils;
