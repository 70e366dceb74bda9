//! CLI command handlers for `moyenne`.
//!
//! Each subcommand is implemented in its own submodule; `selection` holds the
//! helpers the calculator commands share.

pub mod catalog;
pub mod compute;
pub mod config;
mod selection;
pub mod shell;
