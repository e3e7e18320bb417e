//! zodgen - Generate Zod validation schemas from Prisma-style schema files.
//!
//! The pipeline extracts `enum` and `model` blocks from the input, parses
//! them into a [`Schema`](schema::Schema), maps each field type to a Zod
//! expression, emits one declaration per entity and orders the declarations
//! so that every declaration follows the ones it references.

pub mod config;
pub mod emit;
pub mod mapper;
pub mod sort;

mod error;

pub use zodgen_core::{declaration, schema};
pub use zodgen_parser::ParsedSchema;

pub use error::ZodgenError;

use log::{debug, info, trace};

use zodgen_parser::ParseConfig;

use config::AppConfig;
use declaration::DeclarationBlock;
use emit::Emitter;
use schema::Schema;

/// Builder for parsing schema files and generating Zod declarations.
///
/// # Examples
///
/// ```rust
/// use zodgen::{SchemaBuilder, config::AppConfig};
///
/// let source = "enum Role { ADMIN USER }\nmodel User {\n  role Role\n}";
///
/// let builder = SchemaBuilder::new(AppConfig::default());
/// let parsed = builder.parse(source).expect("Failed to parse");
/// let output = builder.generate(parsed.schema()).expect("Failed to generate");
///
/// assert!(output.contains("role: RoleEnum"));
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    config: AppConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Get the configuration this builder uses.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a schema.
    ///
    /// Recoverable problems, such as malformed field lines, are returned as
    /// warnings alongside the schema. In strict mode they are errors.
    ///
    /// # Errors
    ///
    /// Returns [`ZodgenError::Parse`] when the parser reports errors.
    pub fn parse(&self, source: &str) -> Result<ParsedSchema, ZodgenError> {
        info!(strict = self.config.strict(); "Parsing schema");

        let parsed = zodgen_parser::parse(source, ParseConfig::new(self.config.strict()))
            .map_err(|err| ZodgenError::new_parse_error(err, source))?;

        debug!(
            enums = parsed.schema().enums().len(),
            models = parsed.schema().models().len(),
            warnings = parsed.warnings().len();
            "Schema parsed successfully"
        );
        trace!(schema:? = parsed.schema(); "Parsed schema");

        Ok(parsed)
    }

    /// Emit one declaration per enum and model, enums first, in source order.
    pub fn emit(&self, schema: &Schema) -> Vec<DeclarationBlock> {
        Emitter::new(schema, self.config.types()).emit()
    }

    /// Generate the complete output text for a schema.
    ///
    /// The output is the configured header line followed by the declarations
    /// in dependency order, separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`ZodgenError::CyclicDependency`] if declarations reference
    /// each other in a cycle.
    pub fn generate(&self, schema: &Schema) -> Result<String, ZodgenError> {
        info!("Generating declarations");

        let blocks = sort::sort_declarations(self.emit(schema))?;
        let output = emit::render(self.config.output().header(), &blocks);

        debug!(declarations = blocks.len(), bytes = output.len(); "Declarations generated");

        Ok(output)
    }
}

/// Parse `source` and generate its Zod declarations with the default configuration.
///
/// # Errors
///
/// Returns [`ZodgenError`] if parsing or ordering fails.
///
/// # Examples
///
/// ```rust
/// let output = zodgen::generate_zod_schema("").expect("Failed to generate");
/// assert_eq!(output, "import * as z from 'zod';\n");
/// ```
pub fn generate_zod_schema(source: &str) -> Result<String, ZodgenError> {
    let builder = SchemaBuilder::default();
    let parsed = builder.parse(source)?;
    builder.generate(parsed.schema())
}
