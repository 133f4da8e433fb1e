//! Command-line interface for the umlforge utility
//!
//! Provides a CLI to generate Java classes and SQL schemas from JetUML
//! class diagrams.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use umlforge::core::Database;
use umlforge::plugins::jetuml::ClassModelDatabase;
use umlforge::plugins::Orchestrator;
use umlforge::{Diagnostics, GeneratorConfig};

/// Schema name used when reading from stdin
pub const STDIN_SCHEMA_NAME: &str = "schema";

/// File suffixes stripped from the input name to derive the schema name
const INPUT_SUFFIXES: &[&str] = &[".class.jet", ".json"];

/// umlforge - Generate Java classes and SQL schemas from JetUML diagrams
#[derive(Parser)]
#[command(name = "umlforge")]
#[command(about = "Generate Java class sources and a SQL schema from a JetUML class diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); falls back to UMLFORGE_LOG_LEVEL
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json); falls back to UMLFORGE_LOG_FORMAT
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Java sources and a SQL schema
    Generate {
        /// Input JetUML diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving the generated files [default: Diagram_<schema name>]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Java package declared in every source
        #[arg(short, long)]
        package: Option<String>,

        /// Schema file name without extension [default: input file name]
        #[arg(long)]
        schema_name: Option<String>,

        /// Spaces per indentation level in generated files
        #[arg(long, value_name = "N")]
        indent: Option<usize>,
    },

    /// Run the whole pipeline without writing anything
    Validate {
        /// Input JetUML diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the normalized class model
    Inspect {
        /// Input JetUML diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Derive the schema name from the input path
///
/// `shop.class.jet` gives `shop`; stdin gives [`STDIN_SCHEMA_NAME`].
pub fn default_schema_name(input: Option<&Path>) -> String {
    let file_name = input
        .filter(|path| path.to_string_lossy() != "-")
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned());

    match file_name {
        Some(name) => INPUT_SUFFIXES
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .unwrap_or(name),
        None => STDIN_SCHEMA_NAME.to_string(),
    }
}

/// Default output directory for a schema name
pub fn default_output_dir(schema_name: &str) -> PathBuf {
    PathBuf::from(format!("Diagram_{}", schema_name))
}

/// Main CLI application
pub struct UmlforgeApp {
    config: GeneratorConfig,
}

impl UmlforgeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a new application instance with a generator config
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        if cli.verbose {
            eprintln!("umlforge v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                output_dir,
                package,
                schema_name,
                indent,
            } => self.generate_command(
                input,
                output_dir,
                package,
                schema_name,
                indent,
                cli.verbose,
            ),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &mut self,
        input: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        package: Option<String>,
        schema_name: Option<String>,
        indent: Option<usize>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        if let Some(package) = package {
            self.config = self.config.clone().with_package(package);
        }
        if let Some(indent) = indent {
            self.config = self.config.clone().with_indent(indent);
        }
        let schema_name = schema_name.unwrap_or_else(|| default_schema_name(input.as_deref()));
        let output_dir = output_dir.unwrap_or_else(|| default_output_dir(&schema_name));

        let artifacts = Orchestrator::new(self.config.clone()).generate(&content)?;
        Self::report_diagnostics(&artifacts.diagnostics);

        let written = artifacts.write_to(&output_dir, &schema_name)?;
        for path in &written {
            debug!(path = %path.display(), "Wrote file");
            if verbose {
                eprintln!("Wrote {}", path.display());
            }
        }
        info!(
            sources = artifacts.sources.len(),
            diagnostics = artifacts.diagnostics.len(),
            "Generate command finished"
        );

        println!(
            "Generated {} class source(s) and {} in {}",
            artifacts.sources.len(),
            umlforge::plugins::GeneratedArtifacts::schema_file_name(&schema_name),
            output_dir.display()
        );
        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match Orchestrator::new(self.config.clone()).generate(&content) {
            Ok(artifacts) => {
                Self::report_diagnostics(&artifacts.diagnostics);
                println!(
                    "✓ Valid class diagram: {} class(es), {} warning(s)",
                    artifacts.sources.len(),
                    artifacts.diagnostics.warnings().count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid class diagram: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input.as_deref())?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let (database, diagnostics) = Orchestrator::new(self.config.clone()).parse(&content)?;

        if json {
            let model = serde_json::json!({
                "model": database,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&model)?);
        } else {
            Self::report_diagnostics(&diagnostics);
            print!("{}", Self::describe(&database));
        }
        Ok(())
    }

    /// Human-readable summary of a normalized model
    pub fn describe(database: &ClassModelDatabase) -> String {
        let mut out = String::new();
        for class in database.nodes() {
            match &class.superclass {
                Some(superclass) => out.push_str(&format!("class {} extends {}\n", class.name, superclass)),
                None => out.push_str(&format!("class {}\n", class.name)),
            }
            for attribute in &class.attributes {
                out.push_str(&format!(
                    "  {}{}: {}\n",
                    attribute.visibility.marker(),
                    attribute.name,
                    attribute.type_name
                ));
            }
            for method in &class.methods {
                let parameters = method
                    .parameters
                    .iter()
                    .map(|p| format!("{} {}", p.type_name, p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push_str(&format!(
                    "  {}{}({}): {}\n",
                    method.visibility.marker(),
                    method.name,
                    parameters,
                    method.return_type
                ));
            }
        }
        for association in database.edges() {
            out.push_str(&format!(
                "{} {} -> {}",
                association.kind, association.departure, association.arrival
            ));
            if association.arrival_multiplicity != umlforge::Multiplicity::Unspecified {
                out.push_str(&format!(" [{}]", association.arrival_multiplicity));
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "{} class(es), {} association(s)\n",
            database.node_count(),
            database.edge_count()
        ));
        out
    }

    fn report_diagnostics(diagnostics: &Diagnostics) {
        for diagnostic in diagnostics.iter() {
            eprintln!("{}", diagnostic);
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<&Path>) -> Result<String> {
        let content = match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))?,
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                content
            }
        };
        debug!(
            source = %input.map(|p| p.display().to_string()).unwrap_or_else(|| "-".to_string()),
            bytes = content.len(),
            "Read input"
        );
        Ok(content)
    }
}

impl Default for UmlforgeApp {
    fn default() -> Self {
        Self::new()
    }
}
