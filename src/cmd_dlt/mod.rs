//! Subcommand modules for the `dlt` binary.

pub mod diff;
pub mod filter;
