//! umlforge CLI - Generate Java classes and SQL schemas from JetUML diagrams

mod cli;

use clap::Parser;
use umlforge::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // Flags win; otherwise UMLFORGE_LOG_LEVEL / UMLFORGE_LOG_FORMAT / RUST_LOG apply
    let level = cli_args.log_level.map(|level| level.as_str());
    let format = cli_args.log_format.map(|format| format.as_str());
    if let Err(e) = init_logging(level, format) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mut app = cli::UmlforgeApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
