//! Tests for fatal errors surfaced by the pipeline

use umlforge::core::{Block, DiagramError};
use umlforge::generate;

fn diagram_error(input: &str) -> DiagramError {
    let err = generate(input).unwrap_err();
    match err.downcast::<DiagramError>() {
        Ok(error) => error,
        Err(other) => panic!("Expected DiagramError, got {:?}", other),
    }
}

#[test]
fn test_invalid_json() {
    match diagram_error("{\"nodes\": [\n  {\"id\": 0,}\n]}") {
        DiagramError::ParseError { line, .. } => assert_eq!(line, 2),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_node_without_id() {
    assert!(matches!(
        diagram_error(r#"{"nodes": [{"name": "A"}], "edges": []}"#),
        DiagramError::ParseError { .. }
    ));
}

#[test]
fn test_attribute_missing_colon() {
    let input = r#"{"nodes": [{"id": 0, "name": "Person", "attributes": "+name:String\n+age int"}], "edges": []}"#;
    match diagram_error(input) {
        DiagramError::MalformedDeclaration {
            class,
            block,
            line,
            column,
            ..
        } => {
            assert_eq!(class, "Person");
            assert_eq!(block, Block::Attributes);
            assert_eq!(line, 2);
            assert_eq!(column, 9);
        }
        other => panic!("Expected MalformedDeclaration, got {:?}", other),
    }
}

#[test]
fn test_method_missing_colon() {
    let input = r#"{"nodes": [{"id": 0, "name": "Person", "methods": "+greet()"}], "edges": []}"#;
    assert!(matches!(
        diagram_error(input),
        DiagramError::MalformedDeclaration {
            block: Block::Methods,
            line: 1,
            ..
        }
    ));
}

#[test]
fn test_method_unmatched_parenthesis() {
    let input = r#"{"nodes": [{"id": 0, "name": "Person", "methods": "\n+greet(String other:void"}], "edges": []}"#;
    match diagram_error(input) {
        DiagramError::MalformedDeclaration { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, 20);
        }
        other => panic!("Expected MalformedDeclaration, got {:?}", other),
    }
}

#[test]
fn test_duplicate_node_id() {
    let input = r#"{"nodes": [{"id": 3, "name": "A"}, {"id": 3, "name": "B"}], "edges": []}"#;
    assert!(matches!(
        diagram_error(input),
        DiagramError::DuplicateNodeId { id: 3 }
    ));
}

#[test]
fn test_duplicate_class_name() {
    let input = r#"{"nodes": [{"id": 1, "name": "A"}, {"id": 2, "name": " A "}], "edges": []}"#;
    match diagram_error(input) {
        DiagramError::DuplicateClassName { name } => assert_eq!(name, "A"),
        other => panic!("Expected DuplicateClassName, got {:?}", other),
    }
}

#[test]
fn test_missing_class_name() {
    let input = r#"{"nodes": [{"id": 9, "type": "ClassNode", "name": ""}], "edges": []}"#;
    assert!(matches!(
        diagram_error(input),
        DiagramError::MissingClassName { id: 9 }
    ));
}

#[test]
fn test_non_class_diagram() {
    let input = r#"{"diagram": "SequenceDiagram", "nodes": [], "edges": []}"#;
    match diagram_error(input) {
        DiagramError::InvalidInput { message } => assert!(message.contains("SequenceDiagram")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_error_messages() {
    let error = DiagramError::malformed_declaration("Car", Block::Attributes, 1, 5, "found end of input");
    let message = error.to_string();
    assert!(message.contains("attributes of class 'Car'"));
    assert!(message.contains("found end of input"));

    let error = DiagramError::invalid_input("not a class diagram");
    assert!(error.to_string().contains("Invalid input"));

    let error = DiagramError::UnknownClass {
        name: "Ghost".to_string(),
    };
    assert!(error.to_string().contains("Ghost"));
}
