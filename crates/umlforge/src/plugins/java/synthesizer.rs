//! Java class source synthesizer
//!
//! Produces one compilation unit per class: fields, a synthesized constructor
//! and method stubs.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::constructor::ConstructorPlan;
use super::fields::{association_fields, AssociationField};
use crate::core::{GenerationContext, GeneratorConfig, Location, Synthesizer};
use crate::plugins::jetuml::{ClassModel, ClassModelDatabase, MethodModel};

/// Body placed in every generated method stub
pub const METHOD_BODY: &str = "// function body";

/// Generated source text for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSource {
    pub class_name: String,
    pub file_name: String,
    pub text: String,
}

/// Java source synthesizer
pub struct JavaSynthesizer {
    config: GeneratorConfig,
}

impl JavaSynthesizer {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the source unit for a single class
    pub fn synthesize_class(
        &self,
        database: &ClassModelDatabase,
        class: &ClassModel,
        ctx: &mut GenerationContext,
    ) -> Result<ClassSource> {
        let fields = association_fields(database, class);
        for field in &fields {
            if let Some(base) = &field.renamed_from {
                ctx.diagnostics_mut().info(
                    format!("field {} renamed to {}", base, field.name),
                    Some(Location::class(class.name.as_str())),
                );
            }
        }
        let plan = ConstructorPlan::for_class(database, class, &fields)?;

        let i1 = self.config.indent_str(1);
        let i2 = self.config.indent_str(2);
        let mut out = String::new();

        if let Some(package) = &self.config.package {
            writeln!(out, "package {};", package)?;
            writeln!(out)?;
        }
        writeln!(out, "import java.util.*;")?;
        writeln!(out)?;

        match &class.superclass {
            Some(superclass) => writeln!(
                out,
                "{} class {} extends {} {{",
                class.visibility, class.name, superclass
            )?,
            None => writeln!(out, "{} class {} {{", class.visibility, class.name)?,
        }
        writeln!(out)?;

        writeln!(out, "{}// Attributes", i1)?;
        for attribute in &class.attributes {
            writeln!(
                out,
                "{}{} {} {};",
                i1, attribute.visibility, attribute.type_name, attribute.name
            )?;
        }
        for field in &fields {
            writeln!(out, "{}private {} {};", i1, field.java_type(), field.name)?;
        }
        writeln!(out)?;

        writeln!(out, "{}// Constructor", i1)?;
        writeln!(out, "{}public {}({}) {{", i1, class.name, plan.signature())?;
        if let Some(arguments) = &plan.super_arguments {
            writeln!(out, "{}super({});", i2, arguments.join(", "))?;
        }
        for (field, parameter) in &plan.assignments {
            writeln!(out, "{}this.{} = {};", i2, field, parameter)?;
        }
        for field in &plan.compositions {
            Self::write_composition(&mut out, &i2, field)?;
        }
        writeln!(out, "{}}}", i1)?;
        writeln!(out)?;

        writeln!(out, "{}// Methods", i1)?;
        for method in &class.methods {
            self.write_method(&mut out, method)?;
        }
        writeln!(out, "}}")?;

        trace!(
            class = %class.name,
            fields = class.attributes.len() + fields.len(),
            parameters = plan.parameters.len(),
            "Rendered class"
        );

        Ok(ClassSource {
            class_name: class.name.clone(),
            file_name: format!("{}.java", class.name),
            text: out,
        })
    }

    fn write_composition(out: &mut String, indent: &str, field: &AssociationField) -> std::fmt::Result {
        if field.many {
            writeln!(
                out,
                "{}this.{} = new ArrayList<{}>();",
                indent, field.name, field.element_type
            )?;
            writeln!(
                out,
                "{}this.{}.add(new {}());",
                indent, field.name, field.element_type
            )
        } else {
            writeln!(
                out,
                "{}this.{} = new {}();",
                indent, field.name, field.element_type
            )
        }
    }

    fn write_method(&self, out: &mut String, method: &MethodModel) -> std::fmt::Result {
        let return_type = if method.return_type.is_empty() {
            "void"
        } else {
            method.return_type.as_str()
        };
        let parameters = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            out,
            "{}{} {} {}({}) {{",
            self.config.indent_str(1),
            method.visibility,
            return_type,
            method.name,
            parameters
        )?;
        writeln!(out, "{}{}", self.config.indent_str(2), METHOD_BODY)?;
        writeln!(out, "{}}}", self.config.indent_str(1))
    }
}

impl Default for JavaSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer<ClassModelDatabase> for JavaSynthesizer {
    type Output = Vec<ClassSource>;

    fn synthesize(
        &self,
        database: &ClassModelDatabase,
        ctx: &mut GenerationContext,
    ) -> Result<Vec<ClassSource>> {
        let sources_span = span!(
            Level::INFO,
            "synthesize_sources",
            classes = database.class_count()
        );
        let _enter = sources_span.enter();

        let sources = database
            .classes()
            .iter()
            .map(|class| self.synthesize_class(database, class, ctx))
            .collect::<Result<Vec<_>>>()?;

        debug!(sources = sources.len(), "Sources synthesized");
        Ok(sources)
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "java"
    }
}
