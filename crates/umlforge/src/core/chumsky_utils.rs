//! Shared chumsky parser utilities for declaration parsing
//!
//! All parsers here report [`Rich`] errors so callers can turn a failure
//! into a line/column position.

use chumsky::prelude::*;

use super::Visibility;

/// Parser extras used by every declaration grammar
pub type LineExtra<'src> = extra::Err<Rich<'src, char>>;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), LineExtra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse a leading visibility marker: `+` public, `-` private, `*` protected.
pub fn visibility_marker<'src>(
) -> impl Parser<'src, &'src str, Visibility, LineExtra<'src>> + Clone {
    any().try_map(|c: char, span| {
        Visibility::from_marker(c)
            .ok_or_else(|| Rich::custom(span, format!("'{}' is not a visibility marker", c)))
    })
}

/// Parse everything up to the end of input, trimmed.
pub fn rest_trimmed<'src>() -> impl Parser<'src, &'src str, String, LineExtra<'src>> + Clone {
    any()
        .repeated()
        .to_slice()
        .map(|s: &str| s.trim().to_string())
}

/// Parse a non-blank run of characters not in `stop`, trimmed.
///
/// A run made only of whitespace fails with "missing {what}".
pub fn name_until<'src>(
    stop: &'static str,
    what: &'static str,
) -> impl Parser<'src, &'src str, String, LineExtra<'src>> + Clone {
    none_of(stop)
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(move |s: &str, span| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(Rich::custom(span, format!("missing {}", what)))
            } else {
                Ok(trimmed.to_string())
            }
        })
}

/// Convert a byte offset within `line` into a 1-based character column.
pub fn column_of(line: &str, offset: usize) -> usize {
    line.get(..offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(offset)
        + 1
}
