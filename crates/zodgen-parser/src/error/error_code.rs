//! Error codes for the zodgen diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Block parsing
//! - `E2xx` - Schema validation

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Block Errors (E1xx)
    // =========================================================================
    /// Malformed block.
    ///
    /// An `enum` or `model` block does not match the
    /// `<keyword> <Name> { ... }` shape and was skipped.
    E100,

    /// Malformed field line.
    ///
    /// A model body line could not be split into a field name and a type.
    E101,

    // =========================================================================
    // Schema Errors (E2xx)
    // =========================================================================
    /// Duplicate definition.
    ///
    /// An enum or model with this name was already defined.
    E200,

    /// Empty enum.
    ///
    /// An enum declares no values.
    E201,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed block",
            ErrorCode::E101 => "malformed field line",
            ErrorCode::E200 => "duplicate definition",
            ErrorCode::E201 => "empty enum",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "malformed field line");
        assert_eq!(ErrorCode::E200.description(), "duplicate definition");
    }
}
