//! Core module for the grade calculator

pub mod catalog;
pub mod config;
pub mod engine;
pub mod models;
pub mod report;
pub mod session;

/// Returns the current version of the `moyenne` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
