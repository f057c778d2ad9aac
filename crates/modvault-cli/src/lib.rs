//! modvault CLI library.
//!
//! Input loading (plain and zipped modules) and the command implementations
//! behind the `modvault` binary.

pub mod commands;
pub mod input;
