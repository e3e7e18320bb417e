//! Error and diagnostic system for the zodgen parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors and warnings
//!
//! # Overview
//!
//! Nearly everything the parser finds wrong with its input is recoverable:
//! a malformed field line is dropped, a malformed block is skipped. Those
//! issues are reported as [`Severity::Warning`] diagnostics and returned
//! alongside the parsed schema. Only in strict mode are they promoted to
//! errors, which are wrapped in [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use zodgen_parser::error::{Diagnostic, ErrorCode};
//! # use zodgen_parser::Span;
//!
//! let span = Span::new(40..48);
//!
//! let diag = Diagnostic::warning("field line `isActive` has no type")
//!     .with_code(ErrorCode::E101)
//!     .with_label(span, "expected `<name> <Type>`")
//!     .with_help("add a type after the field name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
