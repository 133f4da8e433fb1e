//! Core parser trait for diagram descriptions
//!
//! This trait defines the interface for turning an external diagram
//! description into the normalized model stored in a database.

use anyhow::Result;

use super::{Database, Diagnostics};

/// Core trait for diagram parsers
///
/// Recoverable problems go to `diagnostics`; structural problems fail the
/// whole parse.
///
/// # Example
/// ```
/// use umlforge::core::{Database, Diagnostics, Parser};
/// use umlforge::plugins::jetuml::{ClassModelDatabase, JetUmlParser};
///
/// let parser = JetUmlParser::new();
/// let mut db = ClassModelDatabase::new();
/// let mut diagnostics = Diagnostics::new();
/// let input = r#"{"nodes":[{"id":0,"name":"Person","attributes":"+name:String","methods":""}],"edges":[]}"#;
/// parser.parse(input, &mut db, &mut diagnostics).unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse a diagram description into the provided database
    fn parse(&self, input: &str, database: &mut D, diagnostics: &mut Diagnostics) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input looks like something this parser understands
    fn can_parse(&self, input: &str) -> bool;
}
