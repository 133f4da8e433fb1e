//! JetUML diagram description
//!
//! Mirrors the parts of a saved `*.class.jet` document the generator reads.
//! Absent optional fields are `None`; an empty string is a present value.

use anyhow::Result;
use serde::Deserialize;

use crate::core::DiagramError;

/// Value of the `diagram` key in saved class diagrams
pub const CLASS_DIAGRAM: &str = "ClassDiagram";

/// Node types that describe classes
pub const CLASS_NODE_TYPES: &[&str] = &["ClassNode", "InterfaceNode"];

/// A whole saved diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiagramDescription {
    #[serde(default)]
    pub diagram: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

/// One diagram node
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeDescription {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: String,
    #[serde(default)]
    pub methods: String,
}

impl NodeDescription {
    /// True unless the node carries a non-class type such as `NoteNode`
    pub fn is_class(&self) -> bool {
        match self.node_type.as_deref() {
            None => true,
            Some(t) => CLASS_NODE_TYPES.contains(&t),
        }
    }
}

/// One diagram edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EdgeDescription {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
    #[serde(default, rename = "startLabel")]
    pub start_label: Option<String>,
    #[serde(default, rename = "middleLabel")]
    pub middle_label: Option<String>,
    #[serde(default)]
    pub directionality: Option<String>,
    #[serde(default, rename = "endLabel")]
    pub end_label: Option<String>,
    #[serde(default, rename = "type")]
    pub edge_type: Option<String>,
    #[serde(default, rename = "Generalization Type", alias = "generalizationType")]
    pub generalization_type: Option<String>,
    #[serde(default, rename = "Aggregation Type", alias = "aggregationType")]
    pub aggregation_type: Option<String>,
}

impl DiagramDescription {
    /// Deserialize a diagram from its JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        let description: DiagramDescription =
            serde_json::from_str(input).map_err(DiagramError::from)?;
        Ok(description)
    }

    /// Reject documents that declare another diagram kind
    ///
    /// A missing `diagram` key is accepted.
    pub fn ensure_class_diagram(&self) -> Result<()> {
        match self.diagram.as_deref().map(str::trim) {
            None => Ok(()),
            Some(CLASS_DIAGRAM) => Ok(()),
            Some(other) => Err(DiagramError::invalid_input(format!(
                "expected a {} document, found {}",
                CLASS_DIAGRAM, other
            ))
            .into()),
        }
    }
}
