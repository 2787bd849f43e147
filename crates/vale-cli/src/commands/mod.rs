//! Subcommands.

pub mod batch;
pub mod config;
pub mod folio;
pub mod process;
pub mod repair;
