//! Non-fatal findings collected during a generation run
//!
//! Problems the pipeline recovers from locally (skipped parameters, dropped
//! edges, omitted columns) are recorded here so they reach the caller along
//! with the artifacts instead of disappearing.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use super::Block;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where in the diagram a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub class: String,
    pub block: Option<Block>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl Location {
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            block: None,
            line: None,
            column: None,
        }
    }

    pub fn declaration(class: impl Into<String>, block: Block, line: usize, column: usize) -> Self {
        Self {
            class: class.into(),
            block: Some(block),
            line: Some(line),
            column: Some(column),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)?;
        if let Some(block) = self.block {
            write!(f, " {}", block)?;
        }
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " {}:{}", line, column),
            (Some(line), None) => write!(f, " {}", line),
            _ => Ok(()),
        }
    }
}

/// A single recovered problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: [{}] {}", self.severity, location, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Ordered diagnostics sink for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and mirror it as a tracing event
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!(diagnostic = %diagnostic, "Diagnostic"),
            Severity::Warning => warn!(diagnostic = %diagnostic, "Diagnostic"),
        }
        self.entries.push(diagnostic);
    }

    pub fn info(&mut self, message: impl Into<String>, location: Option<Location>) {
        self.push(Diagnostic {
            severity: Severity::Info,
            message: message.into(),
            location,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>, location: Option<Location>) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            location,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
