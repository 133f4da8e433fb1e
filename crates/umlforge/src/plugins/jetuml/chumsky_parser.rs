//! Declaration grammar using chumsky
//!
//! Parses single lines of a class node's attribute and method blocks:
//!
//! ```text
//! attribute line ::= [marker] name ":" type
//! method line    ::= [marker] name "(" [param ("," param)*] ")" ":" returnType
//! marker         ::= "+" | "-" | "*"
//! ```
//!
//! Parameters are returned as raw segments with their spans; splitting them
//! into `type name` pairs is recoverable and happens in the normalizer.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    column_of, inline_whitespace, name_until, rest_trimmed, visibility_marker, LineExtra,
};
use crate::core::Visibility;

/// A parsed attribute line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAttribute {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub type_name: String,
}

/// A raw parameter segment between the parentheses of a method line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParameter {
    pub text: String,
    pub span: SimpleSpan,
}

/// A parsed method line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMethod {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub parameters: Vec<ParsedParameter>,
    pub return_type: String,
}

/// Why a line failed to parse, with a 1-based column within that line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub message: String,
    pub column: usize,
}

/// Chumsky-based declaration parser
pub struct ChumskyDeclarationParser;

impl ChumskyDeclarationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one attribute line
    pub fn parse_attribute(&self, line: &str) -> Result<ParsedAttribute, LineError> {
        Self::attribute_parser()
            .then_ignore(end())
            .parse(line)
            .into_result()
            .map_err(|errors| Self::first_error(line, errors))
    }

    /// Parse one method line
    pub fn parse_method(&self, line: &str) -> Result<ParsedMethod, LineError> {
        Self::method_parser()
            .then_ignore(end())
            .parse(line)
            .into_result()
            .map_err(|errors| Self::first_error(line, errors))
    }

    fn first_error(line: &str, errors: Vec<Rich<'_, char>>) -> LineError {
        match errors.into_iter().next() {
            Some(error) => LineError {
                message: error.to_string(),
                column: column_of(line, error.span().start),
            },
            None => LineError {
                message: "unrecognised declaration".to_string(),
                column: 1,
            },
        }
    }

    fn attribute_parser<'src>(
    ) -> impl Parser<'src, &'src str, ParsedAttribute, LineExtra<'src>> + Clone {
        visibility_marker()
            .or_not()
            .then_ignore(inline_whitespace())
            .then(name_until(":", "attribute name"))
            .then_ignore(just(':').labelled("':' before the attribute type"))
            .then(rest_trimmed())
            .map(|((visibility, name), type_name)| ParsedAttribute {
                visibility,
                name,
                type_name,
            })
    }

    fn method_parser<'src>() -> impl Parser<'src, &'src str, ParsedMethod, LineExtra<'src>> + Clone
    {
        let parameter = none_of(",():")
            .repeated()
            .to_slice()
            .map_with(|text: &str, e| ParsedParameter {
                text: text.to_string(),
                span: e.span(),
            });

        let parameters = parameter
            .separated_by(just(','))
            .collect::<Vec<_>>()
            .delimited_by(
                just('(').labelled("'(' after the method name"),
                just(')').labelled("matching ')'"),
            );

        visibility_marker()
            .or_not()
            .then_ignore(inline_whitespace())
            .then(name_until("(:", "method name"))
            .then(parameters)
            .then_ignore(inline_whitespace())
            .then_ignore(just(':').labelled("':' before the return type"))
            .then(rest_trimmed())
            .map(|(((visibility, name), parameters), return_type)| ParsedMethod {
                visibility,
                name,
                parameters,
                return_type,
            })
    }
}

impl Default for ChumskyDeclarationParser {
    fn default() -> Self {
        Self::new()
    }
}
