//! Attribute type and relation kind mapping for DDL

use std::fmt;

use crate::core::RelationKind;

/// Column types the schema can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Varchar,
    Number,
    Boolean,
    Float,
}

impl SqlType {
    /// Map an attribute type; anything outside the vocabulary has no column
    pub fn from_attribute_type(type_name: &str) -> Option<Self> {
        match type_name.trim() {
            "String" => Some(SqlType::Varchar),
            "int" | "long" => Some(SqlType::Number),
            "boolean" => Some(SqlType::Boolean),
            "float" | "double" => Some(SqlType::Float),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SqlType::Varchar => "VARCHAR",
            SqlType::Number => "NUMBER",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Float => "FLOAT",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Referential action attached to a foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyPolicy {
    /// Joined-table inheritance, no ON DELETE clause
    Plain,
    SetNull,
    Cascade,
}

impl ForeignKeyPolicy {
    /// Policy for an association kind; `None` when the kind has no foreign key
    pub fn for_kind(kind: RelationKind) -> Option<Self> {
        match kind {
            RelationKind::Generalization => Some(ForeignKeyPolicy::Plain),
            RelationKind::Aggregation => Some(ForeignKeyPolicy::SetNull),
            RelationKind::Composition => Some(ForeignKeyPolicy::Cascade),
            RelationKind::Other => None,
        }
    }

    /// Suffix appended after the REFERENCES clause
    pub fn clause(self) -> &'static str {
        match self {
            ForeignKeyPolicy::Plain => "",
            ForeignKeyPolicy::SetNull => " ON DELETE SET NULL",
            ForeignKeyPolicy::Cascade => " ON DELETE CASCADE",
        }
    }
}
