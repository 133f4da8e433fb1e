//! Relational schema synthesizer
//!
//! Walks classes in model order. For each class, arrival tables of its
//! foreign-key associations are created first if needed, then the class's own
//! table is created, or altered when an earlier step already created it.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::mapping::{ForeignKeyPolicy, SqlType};
use crate::core::{unique_name, GenerationContext, GeneratorConfig, Location, Synthesizer};
use crate::plugins::jetuml::{ClassModel, ClassModelDatabase};

/// Primary key column of every table
pub const PRIMARY_KEY: &str = "ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Create,
    Alter,
}

/// One CREATE TABLE or ALTER TABLE statement
#[derive(Debug, Clone)]
struct TableStatement {
    kind: StatementKind,
    table: String,
    entries: Vec<String>,
}

impl TableStatement {
    fn create(table: &str) -> Self {
        Self {
            kind: StatementKind::Create,
            table: table.to_string(),
            entries: vec![format!("{} NUMBER PRIMARY KEY", PRIMARY_KEY)],
        }
    }

    fn alter(table: &str) -> Self {
        Self {
            kind: StatementKind::Alter,
            table: table.to_string(),
            entries: Vec::new(),
        }
    }

    fn render(&self, indent: &str) -> String {
        let head = match self.kind {
            StatementKind::Create => format!("CREATE TABLE {} (", self.table),
            StatementKind::Alter => format!("ALTER TABLE {} ADD (", self.table),
        };
        let body = self
            .entries
            .iter()
            .map(|entry| format!("{}{}", indent, entry))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("{}\n{}\n);", head, body)
    }
}

/// A foreign key leaving the current class
struct ForeignKey {
    column: String,
    references: String,
    policy: ForeignKeyPolicy,
}

/// DDL synthesizer
pub struct SchemaSynthesizer {
    config: GeneratorConfig,
}

impl SchemaSynthesizer {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Reserve a column name on `table`, suffixing it on a clash
    fn claim_column(ctx: &mut GenerationContext, table: &str, wanted: &str) -> String {
        let column = unique_name(wanted, "_", |name| ctx.tables().has_column(table, name));
        if column != wanted {
            ctx.diagnostics_mut().info(
                format!("column {} renamed to {}", wanted, column),
                Some(Location::class(table)),
            );
        }
        ctx.tables_mut().add_column(table, &column);
        column
    }

    fn create_table(ctx: &mut GenerationContext, table: &str) -> TableStatement {
        ctx.tables_mut().mark_created(table);
        ctx.tables_mut().add_column(table, PRIMARY_KEY);
        TableStatement::create(table)
    }

    fn synthesize_class(
        &self,
        class: &ClassModel,
        database: &ClassModelDatabase,
        ctx: &mut GenerationContext,
        statements: &mut Vec<TableStatement>,
    ) {
        let table = class.name.as_str();
        let mut foreign_keys = Vec::new();

        for association in database.departing_from(table) {
            let Some(policy) = ForeignKeyPolicy::for_kind(association.kind) else {
                trace!(
                    departure = %association.departure,
                    arrival = %association.arrival,
                    "Association kind has no foreign key"
                );
                continue;
            };
            let arrival = association.arrival.as_str();
            if arrival != table && !ctx.tables().is_created(arrival) {
                trace!(table = arrival, "Creating arrival table");
                statements.push(Self::create_table(ctx, arrival));
            }
            foreign_keys.push((arrival.to_string(), policy));
        }

        let mut statement = if ctx.tables().is_created(table) {
            TableStatement::alter(table)
        } else {
            Self::create_table(ctx, table)
        };

        for attribute in &class.attributes {
            match SqlType::from_attribute_type(&attribute.type_name) {
                Some(sql_type) => {
                    let column = Self::claim_column(ctx, table, &attribute.name);
                    statement.entries.push(format!("{} {}", column, sql_type));
                }
                None => ctx.diagnostics_mut().warning(
                    format!(
                        "attribute {} has unmapped type {}, no column generated",
                        attribute.name, attribute.type_name
                    ),
                    Some(Location::class(table)),
                ),
            }
        }

        let foreign_keys: Vec<ForeignKey> = foreign_keys
            .into_iter()
            .map(|(references, policy)| ForeignKey {
                column: Self::claim_column(ctx, table, &format!("id_{}", references)),
                references,
                policy,
            })
            .collect();
        for key in &foreign_keys {
            statement.entries.push(format!("{} NUMBER", key.column));
        }
        for key in &foreign_keys {
            statement.entries.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({}){}",
                key.column,
                key.references,
                PRIMARY_KEY,
                key.policy.clause()
            ));
        }

        if statement.kind == StatementKind::Alter && statement.entries.is_empty() {
            trace!(table, "Nothing to add");
            return;
        }
        statements.push(statement);
    }
}

impl Default for SchemaSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer<ClassModelDatabase> for SchemaSynthesizer {
    type Output = String;

    fn synthesize(
        &self,
        database: &ClassModelDatabase,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let schema_span = span!(
            Level::INFO,
            "synthesize_schema",
            classes = database.class_count()
        );
        let _enter = schema_span.enter();

        let mut statements = Vec::new();
        for class in database.classes() {
            self.synthesize_class(class, database, ctx, &mut statements);
        }

        let indent = self.config.indent_str(1);
        let mut schema = statements
            .iter()
            .map(|statement| statement.render(&indent))
            .collect::<Vec<_>>()
            .join("\n\n");
        if !schema.is_empty() {
            schema.push('\n');
        }

        debug!(
            statements = statements.len(),
            tables = ctx.tables().len(),
            "Schema synthesized"
        );
        Ok(schema)
    }

    fn name(&self) -> &'static str {
        "schema"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "sql"
    }
}
