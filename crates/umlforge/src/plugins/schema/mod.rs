//! Relational schema plugin
//!
//! Emits CREATE TABLE / ALTER TABLE statements for a class model.

mod mapping;
mod synthesizer;

pub use mapping::{ForeignKeyPolicy, SqlType};
pub use synthesizer::{SchemaSynthesizer, PRIMARY_KEY};
