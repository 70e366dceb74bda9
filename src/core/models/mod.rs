//! Data models for `moyenne`

pub mod module;
pub mod scores;

pub use module::ModuleDefinition;
pub use scores::{coerce_score, ScoreBook, ScoreEntry, ScoreField};
