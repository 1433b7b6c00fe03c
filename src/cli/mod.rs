//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `analyze`: Run the full dependency analysis over component records
//! - `graph`: Export the component dependency graph
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Analyze component records produced by the parsing front end
//! nextlens analyze components.json --project ./my-app
//!
//! # Generate JSON report
//! nextlens analyze components.json --project ./my-app --format json --output report.json
//!
//! # Export the dependency graph
//! nextlens graph components.json --format dot --output components.dot
//!
//! # Initialize configuration
//! nextlens init
//!
//! # Validate configuration
//! nextlens validate nextlens.yaml
//! ```

use crate::types::{GraphFormat, ReportFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// NextLens - React/Next.js component dependency analyzer.
#[derive(Parser, Debug)]
#[command(
    name = "nextlens",
    author,
    version,
    about = "React/Next.js component dependency analyzer",
    long_about = "NextLens consumes component records extracted from a React/Next.js \
                  codebase, builds the component dependency graph, and detects circular \
                  dependencies, unreachable (zombie) component clusters, and package.json \
                  dependency drift."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "NEXTLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full dependency analysis over component records
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Export the component dependency graph
    #[command(visible_alias = "g")]
    Graph(GraphArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Component record files (JSON arrays produced by the parsing front end)
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Project root directory (where package.json lives)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Treat any finding as an error (exit code 1)
    #[arg(long)]
    pub strict: bool,

    /// Continue even if some input files fail to parse
    #[arg(long)]
    pub continue_on_error: bool,

    /// Skip the package.json dependency drift analysis
    #[arg(long)]
    pub skip_packages: bool,
}

/// Arguments for the graph command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Component record files (JSON arrays produced by the parsing front end)
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format for the graph
    #[arg(short, long, default_value = "dot", value_enum)]
    pub format: GraphFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "nextlens.yaml")]
    pub config: PathBuf,
}
