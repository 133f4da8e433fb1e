//! Plugin implementations for the generation pipeline
//!
//! The JetUML plugin reads diagrams; the schema and Java plugins turn the
//! normalized model into DDL and class sources.

pub mod java;
pub mod jetuml;
pub mod orchestrator;
pub mod schema;

pub use java::*;
pub use jetuml::*;
pub use orchestrator::*;
pub use schema::*;
