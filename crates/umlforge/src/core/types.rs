//! Core type definitions for diagram processing
//!
//! This module contains the vocabulary shared by the normalizer and the
//! synthesizers: visibility, relation kinds and multiplicities.

use std::fmt;

use serde::Serialize;

/// Visibility of a class or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public, // +
    #[default]
    Private, // -
    Protected, // *
}

impl Visibility {
    /// Map a leading declaration marker to a visibility
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '*' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '*',
        }
    }

    /// Java keyword for this visibility
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind of relation an association models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    Generalization,
    Aggregation,
    Composition,
    Other,
}

impl RelationKind {
    /// Resolve the kind from a JetUML edge type and its aggregation sub-kind
    ///
    /// `"AggregationEdge"` with sub-kind `"Composition"` is a composition.
    pub fn from_edge(edge_type: Option<&str>, aggregation_type: Option<&str>) -> Self {
        let Some(edge_type) = edge_type else {
            return RelationKind::Other;
        };
        let base = edge_type.trim();
        let base = base.strip_suffix("Edge").unwrap_or(base);
        match base {
            "Generalization" => RelationKind::Generalization,
            "Aggregation" => match aggregation_type.map(str::trim) {
                Some("Composition") => RelationKind::Composition,
                _ => RelationKind::Aggregation,
            },
            "Composition" => RelationKind::Composition,
            _ => RelationKind::Other,
        }
    }

    pub fn is_generalization(self) -> bool {
        matches!(self, RelationKind::Generalization)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Generalization => write!(f, "Generalization"),
            RelationKind::Aggregation => write!(f, "Aggregation"),
            RelationKind::Composition => write!(f, "Composition"),
            RelationKind::Other => write!(f, "Other"),
        }
    }
}

/// Cardinality label on the arrival end of an association
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Multiplicity {
    /// `1`
    One,
    /// `0..1`
    ZeroOrOne,
    /// `*`
    Many,
    /// `0..*`
    ZeroOrMany,
    /// `1..*`
    OneOrMany,
    /// No label, or an empty one
    #[default]
    Unspecified,
    /// Any other label, kept verbatim
    Custom(String),
}

impl Multiplicity {
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            None | Some("") => Multiplicity::Unspecified,
            Some("1") => Multiplicity::One,
            Some("0..1") => Multiplicity::ZeroOrOne,
            Some("*") => Multiplicity::Many,
            Some("0..*") => Multiplicity::ZeroOrMany,
            Some("1..*") => Multiplicity::OneOrMany,
            Some(other) => Multiplicity::Custom(other.to_string()),
        }
    }

    /// True for `*`, `0..*` and `1..*`
    pub fn is_many(&self) -> bool {
        matches!(
            self,
            Multiplicity::Many | Multiplicity::ZeroOrMany | Multiplicity::OneOrMany
        )
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::One => write!(f, "1"),
            Multiplicity::ZeroOrOne => write!(f, "0..1"),
            Multiplicity::Many => write!(f, "*"),
            Multiplicity::ZeroOrMany => write!(f, "0..*"),
            Multiplicity::OneOrMany => write!(f, "1..*"),
            Multiplicity::Unspecified => Ok(()),
            Multiplicity::Custom(token) => write!(f, "{}", token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_markers() {
        assert_eq!(Visibility::from_marker('+'), Some(Visibility::Public));
        assert_eq!(Visibility::from_marker('-'), Some(Visibility::Private));
        assert_eq!(Visibility::from_marker('*'), Some(Visibility::Protected));
        assert_eq!(Visibility::from_marker('#'), None);
        assert_eq!(Visibility::default(), Visibility::Private);
        assert_eq!(Visibility::Protected.marker(), '*');
    }

    #[test]
    fn test_relation_kind_from_edge() {
        assert_eq!(
            RelationKind::from_edge(Some("GeneralizationEdge"), None),
            RelationKind::Generalization
        );
        assert_eq!(
            RelationKind::from_edge(Some("AggregationEdge"), Some("Aggregation")),
            RelationKind::Aggregation
        );
        assert_eq!(
            RelationKind::from_edge(Some("AggregationEdge"), Some("Composition")),
            RelationKind::Composition
        );
        assert_eq!(
            RelationKind::from_edge(Some("AggregationEdge"), None),
            RelationKind::Aggregation
        );
        assert_eq!(
            RelationKind::from_edge(Some("CompositionEdge"), None),
            RelationKind::Composition
        );
        assert_eq!(
            RelationKind::from_edge(Some("DependencyEdge"), None),
            RelationKind::Other
        );
        assert_eq!(RelationKind::from_edge(None, None), RelationKind::Other);
    }

    #[test]
    fn test_multiplicity_parsing() {
        assert_eq!(Multiplicity::parse(Some("1")), Multiplicity::One);
        assert_eq!(Multiplicity::parse(Some(" 0..* ")), Multiplicity::ZeroOrMany);
        assert_eq!(Multiplicity::parse(Some("")), Multiplicity::Unspecified);
        assert_eq!(Multiplicity::parse(None), Multiplicity::Unspecified);
        assert_eq!(
            Multiplicity::parse(Some("2..4")),
            Multiplicity::Custom("2..4".to_string())
        );
    }

    #[test]
    fn test_multiplicity_is_many() {
        for token in ["*", "0..*", "1..*"] {
            assert!(Multiplicity::parse(Some(token)).is_many(), "{}", token);
        }
        for token in ["1", "0..1", "", "many", "2..4"] {
            assert!(!Multiplicity::parse(Some(token)).is_many(), "{}", token);
        }
    }

    #[test]
    fn test_multiplicity_display() {
        assert_eq!(Multiplicity::OneOrMany.to_string(), "1..*");
        assert_eq!(Multiplicity::Unspecified.to_string(), "");
        assert_eq!(Multiplicity::Custom("3".to_string()).to_string(), "3");
    }
}
