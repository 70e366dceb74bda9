//! Library for `moyenne`
//! Contains the catalog, average engine, session state and reporting used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{catalog, config, engine, get_version, models, report, session};
