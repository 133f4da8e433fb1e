//! Core abstractions for diagram processing
//!
//! This module defines the traits every pipeline stage implements, plus the
//! shared vocabulary, errors, diagnostics and logging setup.

pub mod chumsky_utils;
mod config;
mod context;
mod database;
mod diagnostics;
mod error;
pub mod logging;
mod parser;
mod synthesizer;
mod types;

pub use config::*;
pub use context::*;
pub use database::*;
pub use diagnostics::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use synthesizer::*;
pub use types::*;
