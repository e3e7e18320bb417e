//! Error types for zodgen operations.
//!
//! This module provides the main error type [`ZodgenError`] which wraps
//! the error conditions that can occur while generating schemas.

use std::io;

use thiserror::Error;

use zodgen_parser::error::ParseError;

use crate::sort::CyclicDependency;

/// The main error type for zodgen operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// callers can render snippets for each labelled span.
#[derive(Debug, Error)]
pub enum ZodgenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    CyclicDependency(#[from] CyclicDependency),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZodgenError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
