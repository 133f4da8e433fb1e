//! Constructor planning
//!
//! Parameter order is fixed: own attributes, then the superclass's own
//! attributes and aggregation fields (forwarded to `super(...)`), then own
//! aggregation fields. Compositions are never parameters.

use anyhow::Result;

use super::fields::{association_fields, AssociationField};
use crate::core::{unique_name, DiagramError};
use crate::plugins::jetuml::{ClassModel, ClassModelDatabase};

/// A constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParameter {
    pub type_name: String,
    pub name: String,
}

/// What a synthesized constructor declares and does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorPlan {
    pub parameters: Vec<ConstructorParameter>,
    /// Arguments of the `super(...)` call; `None` without a superclass
    pub super_arguments: Option<Vec<String>>,
    /// `(field, parameter)` pairs assigned in the body, attributes first
    pub assignments: Vec<(String, String)>,
    /// Own compositions, constructed in the body
    pub compositions: Vec<AssociationField>,
}

impl ConstructorPlan {
    pub fn for_class(
        database: &ClassModelDatabase,
        class: &ClassModel,
        fields: &[AssociationField],
    ) -> Result<Self> {
        let mut parameters: Vec<ConstructorParameter> = Vec::new();
        let mut add = |type_name: &str, wanted: &str| -> String {
            let name = unique_name(wanted, "", |candidate| {
                parameters.iter().any(|p| p.name == candidate)
            });
            parameters.push(ConstructorParameter {
                type_name: type_name.to_string(),
                name: name.clone(),
            });
            name
        };

        let attribute_params: Vec<String> = class
            .attributes
            .iter()
            .map(|a| add(a.type_name.as_str(), a.name.as_str()))
            .collect();

        let super_arguments = match class.superclass.as_deref() {
            None => None,
            Some(name) => {
                let superclass =
                    database
                        .superclass_of(class)
                        .ok_or_else(|| DiagramError::UnknownClass {
                            name: name.to_string(),
                        })?;
                let mut arguments: Vec<String> = superclass
                    .attributes
                    .iter()
                    .map(|a| add(a.type_name.as_str(), a.name.as_str()))
                    .collect();
                for field in association_fields(database, superclass)
                    .iter()
                    .filter(|f| f.is_aggregation())
                {
                    arguments.push(add(field.java_type().as_str(), field.name.as_str()));
                }
                Some(arguments)
            }
        };

        let mut assignments: Vec<(String, String)> = class
            .attributes
            .iter()
            .zip(attribute_params)
            .map(|(a, param)| (a.name.clone(), param))
            .collect();
        for field in fields.iter().filter(|f| f.is_aggregation()) {
            let param = add(field.java_type().as_str(), field.name.as_str());
            assignments.push((field.name.clone(), param));
        }

        Ok(Self {
            parameters,
            super_arguments,
            assignments,
            compositions: fields.iter().filter(|f| f.is_composition()).cloned().collect(),
        })
    }

    /// Parameter list as `Type name, ...`
    pub fn signature(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
