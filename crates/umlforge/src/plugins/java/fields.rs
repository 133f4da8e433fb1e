//! Association-derived fields
//!
//! Every non-generalization association leaving a class becomes a field named
//! after the lower-cased arrival class. The naming is deterministic so that a
//! subclass threading its superclass's aggregation parameters arrives at the
//! same names the superclass's own constructor uses.

use crate::core::{unique_name, RelationKind};
use crate::plugins::jetuml::{ClassModel, ClassModelDatabase};

/// A field backing one association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationField {
    pub name: String,
    /// Base name before de-duplication, when it had to change
    pub renamed_from: Option<String>,
    pub element_type: String,
    pub many: bool,
    pub kind: RelationKind,
}

impl AssociationField {
    /// Declared Java type: `T`, or `List<T>` when many-valued
    pub fn java_type(&self) -> String {
        if self.many {
            format!("List<{}>", self.element_type)
        } else {
            self.element_type.clone()
        }
    }

    pub fn is_aggregation(&self) -> bool {
        self.kind == RelationKind::Aggregation
    }

    pub fn is_composition(&self) -> bool {
        self.kind == RelationKind::Composition
    }
}

/// Fields for the associations departing `class`, in association order
pub fn association_fields(database: &ClassModelDatabase, class: &ClassModel) -> Vec<AssociationField> {
    let mut taken: Vec<String> = class.attributes.iter().map(|a| a.name.clone()).collect();
    let mut fields = Vec::new();

    for association in database.departing_from(&class.name) {
        if association.kind.is_generalization() {
            continue;
        }
        let base = association.arrival.to_lowercase();
        let name = unique_name(&base, "", |candidate| taken.iter().any(|t| t == candidate));
        taken.push(name.clone());
        fields.push(AssociationField {
            renamed_from: (name != base).then_some(base),
            name,
            element_type: association.arrival.clone(),
            many: association.is_many(),
            kind: association.kind,
        });
    }

    fields
}
