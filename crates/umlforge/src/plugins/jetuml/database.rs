//! Normalized class diagram model
//!
//! Stores classes and associations resolved from a JetUML diagram.

use anyhow::Result;
use serde::Serialize;

use crate::core::{Database, DiagramError, Multiplicity, RelationKind, Visibility};

/// A typed, visibility-tagged attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeModel {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
}

impl AttributeModel {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::default(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterModel {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
}

impl ParameterModel {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A method signature; bodies are never modeled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    pub name: String,
    pub return_type: String,
    pub visibility: Visibility,
    pub parameters: Vec<ParameterModel>,
}

impl MethodModel {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            visibility: Visibility::default(),
            parameters: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterModel) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<AttributeModel>,
    pub methods: Vec<MethodModel>,
    /// Arrival class of the single Generalization edge leaving this class
    pub superclass: Option<String>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            attributes: Vec::new(),
            methods: Vec::new(),
            superclass: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn add_attribute(&mut self, attribute: AttributeModel) {
        self.attributes.push(attribute);
    }

    pub fn add_method(&mut self, method: MethodModel) {
        self.methods.push(method);
    }
}

/// A resolved association between two classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationModel {
    pub kind: RelationKind,
    pub departure: String,
    pub arrival: String,
    pub label: Option<String>,
    pub arrival_multiplicity: Multiplicity,
    pub departure_multiplicity: Multiplicity,
    pub directionality: Option<String>,
}

impl AssociationModel {
    pub fn new(kind: RelationKind, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        Self {
            kind,
            departure: departure.into(),
            arrival: arrival.into(),
            label: None,
            arrival_multiplicity: Multiplicity::Unspecified,
            departure_multiplicity: Multiplicity::Unspecified,
            directionality: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_arrival_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.arrival_multiplicity = multiplicity;
        self
    }

    pub fn with_departure_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.departure_multiplicity = multiplicity;
        self
    }

    pub fn is_many(&self) -> bool {
        self.arrival_multiplicity.is_many()
    }
}

/// Normalized class diagram database
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassModelDatabase {
    classes: Vec<ClassModel>,
    associations: Vec<AssociationModel>,
}

impl ClassModelDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; names are unique keys
    pub fn add_class(&mut self, class: ClassModel) -> Result<()> {
        if self.get_class(&class.name).is_some() {
            return Err(DiagramError::DuplicateClassName { name: class.name }.into());
        }
        self.classes.push(class);
        Ok(())
    }

    /// Add an association; both ends must name known classes
    pub fn add_association(&mut self, association: AssociationModel) -> Result<()> {
        for name in [&association.departure, &association.arrival] {
            if self.get_class(name).is_none() {
                return Err(DiagramError::UnknownClass { name: name.clone() }.into());
            }
        }
        self.associations.push(association);
        Ok(())
    }

    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    pub fn associations(&self) -> &[AssociationModel] {
        &self.associations
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn association_count(&self) -> usize {
        self.associations.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassModel> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut ClassModel> {
        self.classes.iter_mut().find(|c| c.name == name)
    }

    /// Associations leaving `class`, in insertion order
    pub fn departing_from<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a AssociationModel> + 'a {
        self.associations
            .iter()
            .filter(move |a| a.departure == class)
    }

    /// The superclass model of `class`, if it has one
    pub fn superclass_of(&self, class: &ClassModel) -> Option<&ClassModel> {
        class
            .superclass
            .as_deref()
            .and_then(|name| self.get_class(name))
    }
}

impl Database for ClassModelDatabase {
    type Node = ClassModel;
    type Edge = AssociationModel;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_class(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_association(edge)
    }

    fn get_node(&self, name: &str) -> Option<&Self::Node> {
        self.get_class(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.associations.iter()
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.associations.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.associations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_class() {
        let class = ClassModel::new("Animal");
        assert_eq!(class.name, "Animal");
        assert_eq!(class.visibility, Visibility::Public);
        assert!(class.attributes.is_empty());
        assert!(class.methods.is_empty());
        assert!(class.superclass.is_none());
    }

    #[test]
    fn test_attribute_order_is_kept() {
        let mut class = ClassModel::new("Person");
        class.add_attribute(AttributeModel::new("name", "String").with_visibility(Visibility::Public));
        class.add_attribute(AttributeModel::new("age", "int"));

        let names: Vec<_> = class.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(class.attributes[1].visibility, Visibility::Private);
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut db = ClassModelDatabase::new();
        db.add_class(ClassModel::new("Animal")).unwrap();
        let err = db.add_class(ClassModel::new("Animal")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::DuplicateClassName { .. })
        ));
    }

    #[test]
    fn test_association_requires_known_classes() {
        let mut db = ClassModelDatabase::new();
        db.add_class(ClassModel::new("Person")).unwrap();
        let result = db.add_association(AssociationModel::new(
            RelationKind::Aggregation,
            "Person",
            "Car",
        ));
        assert!(result.is_err());
        assert_eq!(db.association_count(), 0);
    }

    #[test]
    fn test_departing_from() {
        let mut db = ClassModelDatabase::new();
        for name in ["Person", "Car", "House"] {
            db.add_class(ClassModel::new(name)).unwrap();
        }
        db.add_association(AssociationModel::new(RelationKind::Aggregation, "Person", "Car"))
            .unwrap();
        db.add_association(AssociationModel::new(RelationKind::Composition, "House", "Person"))
            .unwrap();
        db.add_association(AssociationModel::new(RelationKind::Composition, "Person", "House"))
            .unwrap();

        let arrivals: Vec<_> = db.departing_from("Person").map(|a| a.arrival.as_str()).collect();
        assert_eq!(arrivals, vec!["Car", "House"]);
    }

    #[test]
    fn test_superclass_of() {
        let mut db = ClassModelDatabase::new();
        db.add_class(ClassModel::new("Animal")).unwrap();
        db.add_class(ClassModel::new("Dog").with_superclass("Animal")).unwrap();

        let dog = db.get_class("Dog").unwrap();
        assert_eq!(db.superclass_of(dog).map(|c| c.name.as_str()), Some("Animal"));
        let animal = db.get_class("Animal").unwrap();
        assert!(db.superclass_of(animal).is_none());
    }

    #[test]
    fn test_database_trait() {
        let mut db = ClassModelDatabase::new();
        db.add_node(ClassModel::new("A")).unwrap();
        db.add_node(ClassModel::new("B")).unwrap();
        db.add_edge(AssociationModel::new(RelationKind::Other, "A", "B"))
            .unwrap();

        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
        assert!(db.get_node("B").is_some());

        db.clear();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.edge_count(), 0);
    }
}
