//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;

use crate::error::TransformError;
use crate::options::{Destination, RawOptions, Source};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jyt")]
#[command(about = "Convert between YAML, JSON, and JavaScript module files")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
pub struct Args {
    /// Input file (reads standard input when omitted)
    #[arg(value_name = "INPUT-FILE")]
    pub input: Option<PathBuf>,

    /// Output file (derived from the input file when omitted; standard
    /// output when reading from standard input)
    #[arg(value_name = "OUTPUT-FILE")]
    pub output: Option<PathBuf>,

    /// Origin type: yaml, json, or js (default: inferred from the input
    /// extension, else yaml)
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Target type: yaml, json, or js (default: inferred from the output
    /// extension, else js)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Spaces per indentation level (0-8, default: 2)
    #[arg(short, long)]
    pub indent: Option<i64>,

    /// Overwrite an existing output file instead of picking a new name
    #[arg(short, long)]
    pub force: bool,

    /// Read only this named export of a JS input
    #[arg(short = 'm', long)]
    pub imports: Option<String>,

    /// Write the value under this named export in JS output
    #[arg(short = 'x', long)]
    pub exports: Option<String>,

    /// Prepend a 'use strict' prologue to JS output
    #[arg(long)]
    pub strict: bool,

    /// Emit ES module syntax (export default / export const) in JS output
    #[arg(long)]
    pub es_module: bool,

    /// Use double quotes instead of single quotes in JS output
    #[arg(long)]
    pub double_quote: bool,
}

impl Args {
    /// Translate CLI arguments into the raw options record the resolver
    /// consumes. A missing input becomes a stdin stream source; a missing
    /// output with a stdin source becomes a stdout stream destination.
    pub fn into_raw_options(self) -> RawOptions {
        let mut raw = RawOptions::new();

        raw.src = Some(match &self.input {
            Some(path) => Source::file(path),
            None => Source::stream(std::io::stdin()),
        });
        raw.dest = match (&self.input, &self.output) {
            (_, Some(path)) => Some(Destination::file(path)),
            (Some(_), None) => None, // derived from the input path
            (None, None) => Some(Destination::stream(std::io::stdout())),
        };

        raw.origin = self.origin;
        raw.target = self.target;
        raw.indent = self.indent;
        raw.imports = self.imports;
        raw.exports = self.exports;
        raw.force = self.force.then_some(true);
        raw.strict = self.strict.then_some(true);
        raw.es_module = self.es_module.then_some(true);
        raw.double_quote = self.double_quote.then_some(true);

        raw
    }
}

/// CLI output helpers
pub struct CliUtils;

impl CliUtils {
    /// Show a success message
    pub fn show_success(message: &str) {
        if Self::should_use_color() {
            println!("{} {}", console::style("✓").green(), message);
        } else {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        if Self::should_use_color() {
            eprintln!("{} {}", console::style("✗").red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &TransformError) {
    CliUtils::show_error(&error.user_message());

    if matches!(error, TransformError::Validation(_)) {
        eprintln!("\nTip: run with explicit --origin/--target when types cannot be inferred");
    }

    // Full error chain for diagnostics
    if std::env::var_os("JYT_DEBUG").is_some() {
        eprintln!("\n{:?}", error);
    }

    eprintln!("\nTry 'jyt --help' for usage information.");
}
