//! Per-run generation state
//!
//! A [`GenerationContext`] is created fresh for each run and threaded through
//! the normalizer and both synthesizers. Independent runs never share one.

use std::collections::{BTreeMap, BTreeSet};

use super::Diagnostics;

/// Tables already emitted by the schema synthesizer, with their columns
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, BTreeSet<String>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_created(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Record a table as created. Returns false if it already was.
    pub fn mark_created(&mut self, table: &str) -> bool {
        if self.is_created(table) {
            return false;
        }
        self.tables.insert(table.to_string(), BTreeSet::new());
        true
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|columns| columns.contains(column))
    }

    pub fn add_column(&mut self, table: &str, column: &str) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string());
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// State owned by one generation run
#[derive(Debug, Default)]
pub struct GenerationContext {
    tables: TableRegistry,
    diagnostics: Diagnostics,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut TableRegistry {
        &mut self.tables
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Pick `base`, or `base` followed by the first free numeric suffix
///
/// Suffixes start at 2 and are appended directly unless `separator` is given.
pub fn unique_name(base: &str, separator: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}{}", base, separator, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
