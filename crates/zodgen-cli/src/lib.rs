//! CLI logic for the zodgen schema generator.
//!
//! This module contains the core CLI logic: configuration loading, reading
//! the schema file, reporting warnings and writing the generated output.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use zodgen::{SchemaBuilder, ZodgenError};

/// Run the zodgen CLI application
///
/// This function processes the input file through the zodgen pipeline
/// and writes the generated declarations to the output file. Nothing is
/// written unless generation succeeds.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ZodgenError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors (including warnings in strict mode)
/// - Cyclic dependencies between declarations
pub fn run(args: &Args) -> Result<(), ZodgenError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing schema"
    );

    let app_config = config::load_config(args.config.as_ref())?.with_strict(args.strict);

    let source = fs::read_to_string(&args.input)?;

    let builder = SchemaBuilder::new(app_config);
    let parsed = builder.parse(&source)?;
    error_adapter::report_warnings(parsed.warnings(), &source);
    let output = builder.generate(parsed.schema())?;

    let output_dir = Path::new(&args.output)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }
    fs::write(&args.output, output)?;

    info!(
        output_file = args.output,
        warnings = parsed.warnings().len();
        "Schemas generated successfully"
    );

    Ok(())
}
