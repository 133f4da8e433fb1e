//! JetUML class diagram plugin
//!
//! Reads saved JetUML documents and normalizes them into a class model.

mod chumsky_parser;
mod database;
mod input;
mod parser;

pub use chumsky_parser::{
    ChumskyDeclarationParser, LineError, ParsedAttribute, ParsedMethod, ParsedParameter,
};
pub use database::{
    AssociationModel, AttributeModel, ClassModel, ClassModelDatabase, MethodModel, ParameterModel,
};
pub use input::{
    DiagramDescription, EdgeDescription, NodeDescription, CLASS_DIAGRAM, CLASS_NODE_TYPES,
};
pub use parser::JetUmlParser;
