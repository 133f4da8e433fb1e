//! umlforge - Generate Java classes and SQL schemas from JetUML class diagrams
//!
//! A library for normalizing saved JetUML class diagrams and synthesizing a
//! Java source file per class plus a relational schema for the whole model.
//!
//! # Quick Start
//!
//! ```rust
//! use umlforge::generate;
//!
//! let input = r#"{"nodes": [
//!     {"id": 0, "name": "Person", "attributes": "+name:String", "methods": ""}
//! ], "edges": []}"#;
//! let artifacts = generate(input).unwrap();
//! assert!(artifacts.schema.contains("CREATE TABLE Person"));
//! assert_eq!(artifacts.sources[0].file_name, "Person.java");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use umlforge::prelude::*;
//!
//! let input = r#"{"nodes": [
//!     {"id": 0, "name": "Person", "attributes": "+name:String", "methods": ""},
//!     {"id": 1, "name": "Car", "attributes": "-plate:String", "methods": ""}
//! ], "edges": [
//!     {"start": 0, "end": 1, "type": "AggregationEdge", "endLabel": "1"}
//! ]}"#;
//!
//! // Normalize into a database
//! let parser = JetUmlParser::new();
//! let mut database = ClassModelDatabase::new();
//! let mut ctx = GenerationContext::new();
//! parser.parse(input, &mut database, ctx.diagnostics_mut()).unwrap();
//! assert_eq!(database.node_count(), 2);
//!
//! // Both synthesizers share the run's context
//! let schema = SchemaSynthesizer::new().synthesize(&database, &mut ctx).unwrap();
//! let sources = JavaSynthesizer::new().synthesize(&database, &mut ctx).unwrap();
//! assert!(schema.contains("ON DELETE SET NULL"));
//! assert!(sources[0].text.contains("public Person(String name, Car car)"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Diagnostics, GenerationContext, GeneratorConfig, Multiplicity, Parser,
        RelationKind, Synthesizer, Visibility,
    };
    pub use crate::plugins::java::{ClassSource, JavaSynthesizer};
    pub use crate::plugins::jetuml::{ClassModelDatabase, JetUmlParser};
    pub use crate::plugins::orchestrator::{GeneratedArtifacts, Orchestrator};
    pub use crate::plugins::schema::SchemaSynthesizer;
}

/// Generate the schema and class sources for a JetUML document
///
/// This is the simplest way to run the whole pipeline with default settings.
///
/// # Arguments
/// * `input` - JetUML class diagram JSON
///
/// # Returns
/// * `Ok(GeneratedArtifacts)` - schema text, one source per class, diagnostics
/// * `Err` - If the document is malformed
pub fn generate(input: &str) -> anyhow::Result<plugins::orchestrator::GeneratedArtifacts> {
    generate_with_config(input, GeneratorConfig::default())
}

/// Generate artifacts with a specific configuration
///
/// # Example
/// ```rust
/// use umlforge::{generate_with_config, GeneratorConfig};
///
/// let input = r#"{"nodes": [{"id": 0, "name": "Car"}], "edges": []}"#;
/// let config = GeneratorConfig::new().with_package("com.example");
/// let artifacts = generate_with_config(input, config).unwrap();
/// assert!(artifacts.sources[0].text.starts_with("package com.example;"));
/// ```
pub fn generate_with_config(
    input: &str,
    config: GeneratorConfig,
) -> anyhow::Result<plugins::orchestrator::GeneratedArtifacts> {
    plugins::orchestrator::Orchestrator::new(config).generate(input)
}

/// Normalize a JetUML document into a database without generating
///
/// # Example
/// ```rust
/// use umlforge::parse;
/// use umlforge::prelude::Database;
///
/// let input = r#"{"nodes": [{"id": 0, "name": "A"}, {"id": 1, "name": "B"}],
///                 "edges": [{"start": 1, "end": 0, "type": "GeneralizationEdge"}]}"#;
/// let (db, diagnostics) = parse(input).unwrap();
/// assert_eq!(db.node_count(), 2);
/// assert_eq!(db.edge_count(), 1);
/// assert!(diagnostics.is_empty());
/// ```
pub fn parse(input: &str) -> anyhow::Result<(plugins::jetuml::ClassModelDatabase, Diagnostics)> {
    plugins::orchestrator::Orchestrator::default().parse(input)
}
