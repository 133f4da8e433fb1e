//! Core synthesizer trait for generated artifacts
//!
//! This trait defines the interface for turning the normalized model into
//! output text (DDL, class sources, ...).

use anyhow::Result;

use super::{Database, GenerationContext};

/// Core trait for artifact synthesizers
///
/// Synthesizers share one [`GenerationContext`] per run, so state such as
/// the set of created tables stays consistent across them.
///
/// # Example
/// ```
/// use umlforge::core::{GenerationContext, Synthesizer};
/// use umlforge::plugins::jetuml::ClassModelDatabase;
/// use umlforge::plugins::schema::SchemaSynthesizer;
///
/// let db = ClassModelDatabase::new();
/// let mut ctx = GenerationContext::new();
/// let ddl = SchemaSynthesizer::new().synthesize(&db, &mut ctx).unwrap();
/// assert!(ddl.is_empty());
/// ```
pub trait Synthesizer<D: Database>: Send + Sync {
    /// The output type of this synthesizer
    type Output;

    /// Synthesize the artifact for the whole model
    fn synthesize(&self, database: &D, ctx: &mut GenerationContext) -> Result<Self::Output>;

    /// Get the name of this synthesizer
    fn name(&self) -> &'static str;

    /// Get the version of this synthesizer
    fn version(&self) -> &'static str;

    /// Get the output format
    fn format(&self) -> &'static str;
}
