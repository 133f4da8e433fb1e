//! Generation pipeline orchestrator
//!
//! The orchestrator runs one generation per call:
//! JetUML parser → class model → {schema synthesizer, Java synthesizer}
//!
//! Each run owns a fresh [`GenerationContext`], so independent runs can
//! proceed concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, span, Level};

use crate::core::{DiagramError, Diagnostics, GenerationContext, GeneratorConfig, Parser, Synthesizer};
use crate::plugins::java::{ClassSource, JavaSynthesizer};
use crate::plugins::jetuml::{ClassModelDatabase, JetUmlParser};
use crate::plugins::schema::SchemaSynthesizer;

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifacts {
    pub schema: String,
    pub sources: Vec<ClassSource>,
    pub diagnostics: Diagnostics,
}

impl GeneratedArtifacts {
    /// File name of the schema for a given schema name
    pub fn schema_file_name(schema_name: &str) -> String {
        format!("{}.sql", schema_name)
    }

    /// Write every class source and the schema into `dir`, creating it
    ///
    /// Returns the written paths, class sources first.
    pub fn write_to(&self, dir: &Path, schema_name: &str) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(DiagramError::from)?;

        let mut written = Vec::with_capacity(self.sources.len() + 1);
        for source in &self.sources {
            let path = dir.join(&source.file_name);
            fs::write(&path, &source.text).map_err(DiagramError::from)?;
            written.push(path);
        }

        let path = dir.join(Self::schema_file_name(schema_name));
        fs::write(&path, &self.schema).map_err(DiagramError::from)?;
        written.push(path);

        info!(files = written.len(), dir = %dir.display(), "Artifacts written");
        Ok(written)
    }
}

/// Pipeline orchestrator
pub struct Orchestrator {
    config: GeneratorConfig,
    parser: JetUmlParser,
    schema: SchemaSynthesizer,
    java: JavaSynthesizer,
}

impl Orchestrator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            parser: JetUmlParser::new(),
            schema: SchemaSynthesizer::with_config(config.clone()),
            java: JavaSynthesizer::with_config(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Normalize a JetUML document without generating anything
    pub fn parse(&self, input: &str) -> Result<(ClassModelDatabase, Diagnostics)> {
        let mut database = ClassModelDatabase::new();
        let mut diagnostics = Diagnostics::new();
        self.parser.parse(input, &mut database, &mut diagnostics)?;
        Ok((database, diagnostics))
    }

    /// Run the whole pipeline on a JetUML document
    pub fn generate(&self, input: &str) -> Result<GeneratedArtifacts> {
        let generate_span = span!(Level::INFO, "generate", input_len = input.len());
        let _enter = generate_span.enter();

        info!("Starting generation pipeline");

        let mut ctx = GenerationContext::new();
        let mut database = ClassModelDatabase::new();
        self.parser
            .parse(input, &mut database, ctx.diagnostics_mut())?;
        debug!(
            classes = database.class_count(),
            associations = database.association_count(),
            "Model normalized"
        );

        self.synthesize(&database, ctx)
    }

    /// Generate artifacts from an already normalized model
    pub fn generate_from_database(&self, database: &ClassModelDatabase) -> Result<GeneratedArtifacts> {
        self.synthesize(database, GenerationContext::new())
    }

    fn synthesize(
        &self,
        database: &ClassModelDatabase,
        mut ctx: GenerationContext,
    ) -> Result<GeneratedArtifacts> {
        let schema = self.schema.synthesize(database, &mut ctx)?;
        let sources = self.java.synthesize(database, &mut ctx)?;
        let diagnostics = ctx.into_diagnostics();

        info!(
            sources = sources.len(),
            schema_len = schema.len(),
            diagnostics = diagnostics.len(),
            "Pipeline completed successfully"
        );

        Ok(GeneratedArtifacts {
            schema,
            sources,
            diagnostics,
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
