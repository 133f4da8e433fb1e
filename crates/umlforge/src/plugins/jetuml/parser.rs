//! JetUML class diagram parser
//!
//! Normalizes a saved JetUML document into the class model database.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{ChumskyDeclarationParser, ParsedParameter};
use super::database::{
    AssociationModel, AttributeModel, ClassModel, ClassModelDatabase, MethodModel, ParameterModel,
};
use super::input::{DiagramDescription, EdgeDescription, NodeDescription};
use crate::core::chumsky_utils::column_of;
use crate::core::{
    Block, DiagramError, Diagnostics, Location, Multiplicity, Parser, RelationKind,
};

/// One non-blank line of a declaration block
struct BlockLine<'a> {
    text: &'a str,
    /// 1-based line number within the block
    line: usize,
    /// Characters of leading whitespace trimmed from the raw line
    indent: usize,
}

fn block_lines(block: &str) -> impl Iterator<Item = BlockLine<'_>> {
    block.lines().enumerate().filter_map(|(index, raw)| {
        let text = raw.trim_start();
        let indent = raw.chars().count() - text.chars().count();
        let text = text.trim_end();
        if text.is_empty() {
            None
        } else {
            Some(BlockLine {
                text,
                line: index + 1,
                indent,
            })
        }
    })
}

/// JetUML class diagram parser
pub struct JetUmlParser {
    declarations: ChumskyDeclarationParser,
}

impl JetUmlParser {
    pub fn new() -> Self {
        Self {
            declarations: ChumskyDeclarationParser::new(),
        }
    }

    /// Normalize an already deserialized diagram
    pub fn parse_description(
        &self,
        description: &DiagramDescription,
        database: &mut ClassModelDatabase,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let normalize_span = span!(
            Level::INFO,
            "normalize",
            nodes = description.nodes.len(),
            edges = description.edges.len()
        );
        let _enter = normalize_span.enter();

        description.ensure_class_diagram()?;
        let class_names = self.add_classes(&description.nodes, database, diagnostics)?;
        debug!(class_count = database.class_count(), "Classes normalized");

        let mut superclass_set = HashSet::new();
        for (index, edge) in description.edges.iter().enumerate() {
            self.add_edge(
                index,
                edge,
                &class_names,
                &mut superclass_set,
                database,
                diagnostics,
            )?;
        }
        debug!(
            association_count = database.association_count(),
            diagnostics = diagnostics.len(),
            "Associations normalized"
        );

        Ok(())
    }

    /// Add every class node, returning the id to class name index
    fn add_classes(
        &self,
        nodes: &[NodeDescription],
        database: &mut ClassModelDatabase,
        diagnostics: &mut Diagnostics,
    ) -> Result<HashMap<i64, String>> {
        let mut seen_ids = HashSet::new();
        let mut class_names = HashMap::new();

        for node in nodes {
            if !seen_ids.insert(node.id) {
                return Err(DiagramError::DuplicateNodeId { id: node.id }.into());
            }
            if !node.is_class() {
                diagnostics.info(
                    format!(
                        "skipped node {} of type {}",
                        node.id,
                        node.node_type.as_deref().unwrap_or_default()
                    ),
                    None,
                );
                continue;
            }

            let class = self.build_class(node, diagnostics)?;
            trace!(
                class = %class.name,
                attributes = class.attributes.len(),
                methods = class.methods.len(),
                "Parsed class"
            );
            class_names.insert(node.id, class.name.clone());
            database.add_class(class)?;
        }

        Ok(class_names)
    }

    fn build_class(&self, node: &NodeDescription, diagnostics: &mut Diagnostics) -> Result<ClassModel> {
        let name = node.name.trim();
        if name.is_empty() {
            return Err(DiagramError::MissingClassName { id: node.id }.into());
        }

        let mut class = ClassModel::new(name);
        for attribute in self.parse_attributes(name, &node.attributes)? {
            class.add_attribute(attribute);
        }
        for method in self.parse_methods(name, &node.methods, diagnostics)? {
            class.add_method(method);
        }
        Ok(class)
    }

    /// Parse an attribute block, one declaration per non-blank line
    pub fn parse_attributes(&self, class: &str, block: &str) -> Result<Vec<AttributeModel>> {
        let mut attributes = Vec::new();
        for line in block_lines(block) {
            let parsed = self.declarations.parse_attribute(line.text).map_err(|e| {
                DiagramError::malformed_declaration(
                    class,
                    Block::Attributes,
                    line.line,
                    line.indent + e.column,
                    e.message,
                )
            })?;
            attributes.push(
                AttributeModel::new(parsed.name, parsed.type_name)
                    .with_visibility(parsed.visibility.unwrap_or_default()),
            );
        }
        Ok(attributes)
    }

    /// Parse a method block, one signature per non-blank line
    ///
    /// Parameters that are not exactly `type name` are skipped with a warning.
    pub fn parse_methods(
        &self,
        class: &str,
        block: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<MethodModel>> {
        let mut methods = Vec::new();
        for line in block_lines(block) {
            let parsed = self.declarations.parse_method(line.text).map_err(|e| {
                DiagramError::malformed_declaration(
                    class,
                    Block::Methods,
                    line.line,
                    line.indent + e.column,
                    e.message,
                )
            })?;

            let mut method = MethodModel::new(parsed.name, parsed.return_type)
                .with_visibility(parsed.visibility.unwrap_or_default());

            // `name()` yields a single blank segment
            let no_parameters =
                parsed.parameters.len() == 1 && parsed.parameters[0].text.trim().is_empty();
            if !no_parameters {
                for parameter in &parsed.parameters {
                    match Self::split_parameter(parameter) {
                        Some(model) => method = method.with_parameter(model),
                        None => diagnostics.warning(
                            format!(
                                "skipped parameter '{}' of {}: expected `type name`",
                                parameter.text.trim(),
                                method.name
                            ),
                            Some(Location::declaration(
                                class,
                                Block::Methods,
                                line.line,
                                line.indent + column_of(line.text, parameter.span.start),
                            )),
                        ),
                    }
                }
            }

            methods.push(method);
        }
        Ok(methods)
    }

    fn split_parameter(parameter: &ParsedParameter) -> Option<ParameterModel> {
        let mut tokens = parameter.text.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(type_name), Some(name), None) => Some(ParameterModel::new(type_name, name)),
            _ => None,
        }
    }

    fn resolve_end(
        class_names: &HashMap<i64, String>,
        id: Option<i64>,
        end: &str,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let Some(id) = id else {
            diagnostics.warning(format!("dropped edge {}: no {} node", index, end), None);
            return None;
        };
        let name = class_names.get(&id).cloned();
        if name.is_none() {
            diagnostics.warning(
                format!(
                    "dropped edge {}: {} node {} is not a class",
                    index, end, id
                ),
                None,
            );
        }
        name
    }

    fn add_edge(
        &self,
        index: usize,
        edge: &EdgeDescription,
        class_names: &HashMap<i64, String>,
        superclass_set: &mut HashSet<String>,
        database: &mut ClassModelDatabase,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let departure = Self::resolve_end(class_names, edge.start, "start", index, diagnostics);
        let arrival = Self::resolve_end(class_names, edge.end, "end", index, diagnostics);
        let (Some(departure), Some(arrival)) = (departure, arrival) else {
            return Ok(());
        };

        let kind = RelationKind::from_edge(edge.edge_type.as_deref(), edge.aggregation_type.as_deref());

        if kind.is_generalization() {
            if departure == arrival {
                diagnostics.warning(
                    format!("dropped edge {}: {} cannot extend itself", index, departure),
                    Some(Location::class(departure.as_str())),
                );
                return Ok(());
            }
            if !superclass_set.insert(departure.clone()) {
                diagnostics.warning(
                    format!(
                        "dropped edge {}: {} already has a superclass, ignoring {}",
                        index, departure, arrival
                    ),
                    Some(Location::class(departure.as_str())),
                );
                return Ok(());
            }
            if let Some(class) = database.get_class_mut(&departure) {
                class.superclass = Some(arrival.clone());
            }
        }

        let mut association = AssociationModel::new(kind, departure, arrival)
            .with_arrival_multiplicity(Multiplicity::parse(edge.end_label.as_deref()))
            .with_departure_multiplicity(Multiplicity::parse(edge.start_label.as_deref()));
        if let Some(label) = &edge.middle_label {
            association = association.with_label(label.clone());
        }
        association.directionality = edge.directionality.clone();

        trace!(
            kind = %association.kind,
            departure = %association.departure,
            arrival = %association.arrival,
            multiplicity = %association.arrival_multiplicity,
            "Resolved association"
        );
        database.add_association(association)
    }
}

impl Default for JetUmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ClassModelDatabase> for JetUmlParser {
    fn parse(
        &self,
        input: &str,
        database: &mut ClassModelDatabase,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let description = DiagramDescription::from_json(input)?;
        self.parse_description(&description, database, diagnostics)
    }

    fn name(&self) -> &'static str {
        "jetuml"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(input)
            .map(|value| value.get("nodes").is_some_and(|nodes| nodes.is_array()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, Visibility};

    fn parse(input: &str) -> Result<(ClassModelDatabase, Diagnostics)> {
        let parser = JetUmlParser::new();
        let mut db = ClassModelDatabase::new();
        let mut diagnostics = Diagnostics::new();
        parser.parse(input, &mut db, &mut diagnostics)?;
        Ok((db, diagnostics))
    }

    fn person_car(edge: &str) -> String {
        format!(
            r#"{{"nodes": [
                {{"id": 1, "type": "ClassNode", "name": "Person",
                  "attributes": "+name:String", "methods": ""}},
                {{"id": 2, "type": "ClassNode", "name": "Car",
                  "attributes": "-plate:String", "methods": ""}}
            ], "edges": [{}]}}"#,
            edge
        )
    }

    #[test]
    fn test_parse_classes_in_order() {
        let input = r#"{"nodes": [
            {"id": 5, "name": "B", "attributes": "", "methods": ""},
            {"id": 3, "name": "A", "attributes": "", "methods": ""}
        ], "edges": []}"#;
        let (db, diagnostics) = parse(input).unwrap();
        let names: Vec<_> = db.classes().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_attributes_with_default_visibility() {
        let parser = JetUmlParser::new();
        let attributes = parser
            .parse_attributes("Person", "+name:String\n\n  age:int\n*id : long\n")
            .unwrap();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0].visibility, Visibility::Public);
        assert_eq!(attributes[1].name, "age");
        assert_eq!(attributes[1].visibility, Visibility::Private);
        assert_eq!(attributes[2].visibility, Visibility::Protected);
        assert_eq!(attributes[2].type_name, "long");
    }

    #[test]
    fn test_attribute_without_colon_is_fatal() {
        let parser = JetUmlParser::new();
        let err = parser
            .parse_attributes("Person", "+name:String\n  +age int")
            .unwrap_err();
        match err.downcast_ref::<DiagramError>() {
            Some(DiagramError::MalformedDeclaration {
                class,
                block,
                line,
                column,
                ..
            }) => {
                assert_eq!(class, "Person");
                assert_eq!(*block, Block::Attributes);
                assert_eq!(*line, 2);
                assert_eq!(*column, 11);
            }
            other => panic!("Expected MalformedDeclaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_methods() {
        let parser = JetUmlParser::new();
        let mut diagnostics = Diagnostics::new();
        let methods = parser
            .parse_methods(
                "Account",
                "+deposit(double amount):void\n-audit():boolean\nclose():",
                &mut diagnostics,
            )
            .unwrap();

        assert_eq!(methods.len(), 3);
        assert_eq!(methods[0].name, "deposit");
        assert_eq!(
            methods[0].parameters,
            vec![ParameterModel::new("double", "amount")]
        );
        assert_eq!(methods[1].visibility, Visibility::Private);
        assert!(methods[1].parameters.is_empty());
        assert_eq!(methods[2].return_type, "");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_parameter_is_skipped() {
        let parser = JetUmlParser::new();
        let mut diagnostics = Diagnostics::new();
        let methods = parser
            .parse_methods(
                "Account",
                "+move(int x, y, final int z):void",
                &mut diagnostics,
            )
            .unwrap();

        assert_eq!(methods[0].parameters, vec![ParameterModel::new("int", "x")]);
        let warnings: Vec<_> = diagnostics.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("'y'"));
        let location = warnings[0].location.as_ref().unwrap();
        assert_eq!(location.block, Some(Block::Methods));
        assert_eq!(location.line, Some(1));
        assert_eq!(location.column, Some(13));
    }

    #[test]
    fn test_method_with_unmatched_parenthesis_is_fatal() {
        let parser = JetUmlParser::new();
        let mut diagnostics = Diagnostics::new();
        let err = parser
            .parse_methods("Account", "+close(int code:void", &mut diagnostics)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::MalformedDeclaration {
                block: Block::Methods,
                line: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_aggregation_edge() {
        let input = person_car(
            r#"{"start": 1, "end": 2, "type": "AggregationEdge",
                "Aggregation Type": "Aggregation", "endLabel": "1", "middleLabel": "drives"}"#,
        );
        let (db, _) = parse(&input).unwrap();

        let association = &db.associations()[0];
        assert_eq!(association.kind, RelationKind::Aggregation);
        assert_eq!(association.departure, "Person");
        assert_eq!(association.arrival, "Car");
        assert_eq!(association.arrival_multiplicity, Multiplicity::One);
        assert_eq!(association.departure_multiplicity, Multiplicity::Unspecified);
        assert_eq!(association.label.as_deref(), Some("drives"));
    }

    #[test]
    fn test_composition_sub_kind() {
        let input = person_car(
            r#"{"start": 1, "end": 2, "type": "AggregationEdge",
                "Aggregation Type": "Composition", "endLabel": "1..*"}"#,
        );
        let (db, _) = parse(&input).unwrap();
        let association = &db.associations()[0];
        assert_eq!(association.kind, RelationKind::Composition);
        assert!(association.is_many());
    }

    #[test]
    fn test_generalization_sets_superclass() {
        let input = person_car(r#"{"start": 1, "end": 2, "type": "GeneralizationEdge"}"#);
        let (db, _) = parse(&input).unwrap();
        assert_eq!(
            db.get_class("Person").unwrap().superclass.as_deref(),
            Some("Car")
        );
        assert_eq!(db.association_count(), 1);
    }

    #[test]
    fn test_second_generalization_is_dropped() {
        let input = r#"{"nodes": [
            {"id": 1, "name": "Dog"},
            {"id": 2, "name": "Animal"},
            {"id": 3, "name": "Pet"}
        ], "edges": [
            {"start": 1, "end": 2, "type": "GeneralizationEdge"},
            {"start": 1, "end": 3, "type": "GeneralizationEdge"}
        ]}"#;
        let (db, diagnostics) = parse(input).unwrap();

        assert_eq!(
            db.get_class("Dog").unwrap().superclass.as_deref(),
            Some("Animal")
        );
        assert_eq!(db.association_count(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_self_generalization_is_dropped() {
        let input = r#"{"nodes": [{"id": 1, "name": "Node"}],
            "edges": [{"start": 1, "end": 1, "type": "GeneralizationEdge"}]}"#;
        let (db, diagnostics) = parse(input).unwrap();
        assert!(db.get_class("Node").unwrap().superclass.is_none());
        assert_eq!(db.association_count(), 0);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_unresolved_edge_is_dropped() {
        let input = person_car(r#"{"start": 1, "end": 42, "type": "AggregationEdge"}"#);
        let (db, diagnostics) = parse(&input).unwrap();
        assert_eq!(db.association_count(), 0);
        let warning = diagnostics.warnings().next().unwrap();
        assert!(warning.message.contains("42"));
    }

    #[test]
    fn test_edge_without_end_is_dropped() {
        let input = person_car(r#"{"start": 1, "type": "DependencyEdge"}"#);
        let (db, diagnostics) = parse(&input).unwrap();
        assert_eq!(db.association_count(), 0);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_note_nodes_are_skipped() {
        let input = r#"{"nodes": [
            {"id": 1, "type": "ClassNode", "name": "Person"},
            {"id": 2, "type": "NoteNode", "name": "todo: add address"}
        ], "edges": [{"start": 2, "end": 1, "type": "NoteEdge"}]}"#;
        let (db, diagnostics) = parse(input).unwrap();
        assert_eq!(db.class_count(), 1);
        assert_eq!(db.association_count(), 0);
        assert!(diagnostics.iter().any(|d| d.severity == Severity::Info));
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_duplicate_node_id_is_fatal() {
        let input = r#"{"nodes": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}], "edges": []}"#;
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::DuplicateNodeId { id: 1 })
        ));
    }

    #[test]
    fn test_duplicate_class_name_is_fatal() {
        let input = r#"{"nodes": [{"id": 1, "name": "A"}, {"id": 2, "name": "A"}], "edges": []}"#;
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::DuplicateClassName { .. })
        ));
    }

    #[test]
    fn test_missing_class_name_is_fatal() {
        let input = r#"{"nodes": [{"id": 7, "name": "  "}], "edges": []}"#;
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::MissingClassName { id: 7 })
        ));
    }

    #[test]
    fn test_other_diagram_kind_is_rejected() {
        let input = r#"{"diagram": "StateDiagram", "nodes": [{"id": 1, "name": "Idle"}], "edges": []}"#;
        let err = parse(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_can_parse() {
        let parser = JetUmlParser::new();
        assert!(parser.can_parse(r#"{"nodes": [], "edges": []}"#));
        assert!(!parser.can_parse(r#"{"edges": []}"#));
        assert!(!parser.can_parse("graph TD; A-->B"));
    }
}
