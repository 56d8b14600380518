//! Shared utilities for the keyrig CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
