//! Command-line argument definitions for the zodgen CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, strictness and logging verbosity.

use clap::Parser;

/// Command-line arguments for the zodgen schema generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input schema file
    #[arg(default_value = "schema.prisma", help = "Path to the input file")]
    pub input: String,

    /// Path to the generated TypeScript file
    #[arg(short, long, default_value = "zodSchemas.ts")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}
