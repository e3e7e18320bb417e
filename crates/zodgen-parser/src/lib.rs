//! # Zodgen Parser
//!
//! Parser for Prisma-style schema files. Only `enum` and `model` blocks
//! with flat `name Type` fields are understood; everything else in the
//! file is skipped.
//!
//! ## Usage
//!
//! ```
//! # use zodgen_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         enum UserRole {
//!             ADMIN
//!             USER
//!         }
//!
//!         model User {
//!             id   Int    @id
//!             role UserRole
//!         }
//!     "#;
//!
//!     let parsed = parse(source, ParseConfig::default())?;
//!     assert_eq!(parsed.schema().model_names(), vec!["User"]);
//!     Ok(())
//! }
//! ```

pub mod block;
pub mod error;
pub mod extract;
mod grammar;
mod span;

pub use grammar::BlockKind;
pub use span::Span;

use std::collections::HashMap;

use log::debug;

use zodgen_core::schema::Schema;

use error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};
use extract::Fragment;

/// Configuration for [`parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseConfig {
    strict: bool,
}

impl ParseConfig {
    /// Create a new parse configuration.
    ///
    /// # Arguments
    ///
    /// * `strict` - Treat every recoverable issue as an error
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Returns `true` if warnings are promoted to errors.
    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// A parsed schema together with the warnings raised while parsing it.
#[derive(Debug, Clone)]
pub struct ParsedSchema {
    schema: Schema,
    warnings: Vec<Diagnostic>,
}

impl ParsedSchema {
    /// Get the parsed schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get the warnings for recovered issues.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Split into the schema and its warnings.
    pub fn into_parts(self) -> (Schema, Vec<Diagnostic>) {
        (self.schema, self.warnings)
    }
}

/// Tracks the first definition of each name so duplicates can be skipped.
#[derive(Default)]
struct Definitions {
    seen: HashMap<String, Span>,
}

impl Definitions {
    /// Record `name`; returns `false` and emits `E200` if it was already defined.
    fn insert(
        &mut self,
        kind: BlockKind,
        name: &str,
        fragment: &Fragment<'_>,
        diagnostics: &mut DiagnosticCollector,
    ) -> bool {
        if let Some(first) = self.seen.get(name) {
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "{} `{name}` is defined multiple times",
                    kind.keyword()
                ))
                .with_code(ErrorCode::E200)
                .with_label(fragment.span(), "duplicate definition")
                .with_secondary_label(*first, "first defined here")
                .with_help("only the first definition is used"),
            );
            return false;
        }
        self.seen.insert(name.to_string(), fragment.span());
        true
    }
}

/// Parse source text into a [`Schema`].
///
/// This is the main entry point of the crate. It runs the two front stages
/// of the pipeline:
///
/// 1. **Extract** - Slice out every `enum` and `model` block
/// 2. **Parse** - Turn each block into an `EnumDef` or `ModelDef`
///
/// Recoverable issues (malformed field lines, malformed or unterminated
/// blocks, duplicate names, empty enums) are returned as warnings in the
/// [`ParsedSchema`]. With [`ParseConfig::strict`] they become errors.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic if any diagnostic is
/// an error.
pub fn parse(source: &str, config: ParseConfig) -> Result<ParsedSchema, ParseError> {
    let mut diagnostics = if config.strict() {
        DiagnosticCollector::strict()
    } else {
        DiagnosticCollector::new()
    };

    let extracted = extract::extract(source);
    debug!(
        enums = extracted.enums().len(),
        models = extracted.models().len();
        "Blocks extracted"
    );

    for unterminated in extracted.unterminated() {
        diagnostics.emit(
            Diagnostic::warning(format!(
                "{} `{}` is never closed",
                unterminated.kind().keyword(),
                unterminated.name()
            ))
            .with_code(ErrorCode::E100)
            .with_label(unterminated.span(), "block opened here")
            .with_help("add a closing `}`"),
        );
    }

    let mut enum_names = Definitions::default();
    let mut enums = Vec::with_capacity(extracted.enums().len());
    for fragment in extracted.enums() {
        let Some(def) = block::parse_enum(fragment) else {
            diagnostics.emit(malformed_block(fragment));
            continue;
        };
        if !enum_names.insert(BlockKind::Enum, def.name(), fragment, &mut diagnostics) {
            continue;
        }
        if def.is_empty() {
            diagnostics.emit(
                Diagnostic::warning(format!("enum `{}` has no values", def.name()))
                    .with_code(ErrorCode::E201)
                    .with_label(fragment.span(), "empty enum")
                    .with_help("add at least one value; an empty enum accepts nothing"),
            );
        }
        enums.push(def);
    }

    let mut model_names = Definitions::default();
    let mut models = Vec::with_capacity(extracted.models().len());
    for fragment in extracted.models() {
        let Some(def) = block::parse_model(fragment, &mut diagnostics) else {
            diagnostics.emit(malformed_block(fragment));
            continue;
        };
        if model_names.insert(BlockKind::Model, def.name(), fragment, &mut diagnostics) {
            models.push(def);
        }
    }

    let warnings = diagnostics.finish()?;
    debug!(
        enums = enums.len(),
        models = models.len(),
        warnings = warnings.len();
        "Schema parsed"
    );

    Ok(ParsedSchema {
        schema: Schema::new(enums, models),
        warnings,
    })
}

fn malformed_block(fragment: &Fragment<'_>) -> Diagnostic {
    Diagnostic::warning(format!(
        "`{}` block could not be parsed",
        fragment.kind().keyword()
    ))
    .with_code(ErrorCode::E100)
    .with_label(fragment.span(), "skipped")
    .with_help("blocks must have the shape `<keyword> <Name> { ... }`")
}
