//! Core error types for diagram processing
//!
//! This module defines the errors that abort a generation run. Recoverable
//! problems are reported through [`crate::core::Diagnostics`] instead.

use std::fmt;

use thiserror::Error;

/// Which free-text block of a class node a declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Attributes,
    Methods,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Attributes => write!(f, "attributes"),
            Block::Methods => write!(f, "methods"),
        }
    }
}

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error(
        "Malformed declaration in {block} of class '{class}': {message} at line {line}, column {column}"
    )]
    MalformedDeclaration {
        class: String,
        block: Block,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Duplicate node id: {id}")]
    DuplicateNodeId { id: i64 },

    #[error("Duplicate class name: {name}")]
    DuplicateClassName { name: String },

    #[error("Class node {id} has no name")]
    MissingClassName { id: i64 },

    #[error("Unknown class: {name}")]
    UnknownClass { name: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new malformed-declaration error
    pub fn malformed_declaration(
        class: impl Into<String>,
        block: Block,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedDeclaration {
            class: class.into(),
            block,
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("Invalid syntax".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("Invalid syntax"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_malformed_declaration() {
        let error =
            DiagramError::malformed_declaration("Person", Block::Methods, 2, 7, "expected ':'");
        let error_msg = error.to_string();
        assert!(error_msg.contains("methods of class 'Person'"));
        assert!(error_msg.contains("line 2"));
        assert!(error_msg.contains("column 7"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let error: DiagramError = json_err.into();
        match error {
            DiagramError::ParseError { line, .. } => assert_eq!(line, 1),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
