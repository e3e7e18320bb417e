//! Configuration types for schema generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field has a default; an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`OutputConfig`] - Controls the header line of the generated file.
//! - [`TypesConfig`] - Controls how field types are mapped to validators.
//!
//! # Example
//!
//! ```toml
//! strict = false
//!
//! [output]
//! header = "import { z } from 'zod';"
//!
//! [types]
//! unknown = "omit"
//!
//! [types.primitives]
//! DateTime = "z.coerce.date()"
//! Float = "z.number()"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// The header line written at the top of every generated file.
pub const DEFAULT_HEADER: &str = "import * as z from 'zod';";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Promote parser warnings to errors.
    #[serde(default)]
    strict: bool,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Type mapping configuration section.
    #[serde(default)]
    types: TypesConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    pub fn new(strict: bool, output: OutputConfig, types: TypesConfig) -> Self {
        Self {
            strict,
            output,
            types,
        }
    }

    /// Returns a copy with strict mode turned on when `strict` is `true`.
    ///
    /// Strict mode requested on the command line cannot be turned off again
    /// by this method.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict |= strict;
        self
    }

    /// Returns `true` if parser warnings are treated as errors.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the type mapping configuration.
    pub fn types(&self) -> &TypesConfig {
        &self.types
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Header line importing the validation library.
    #[serde(default = "default_header")]
    header: String,
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`] with the given header line.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Returns the header line.
    pub fn header(&self) -> &str {
        &self.header
    }
}

/// What to do with a field whose type is neither a primitive, an enum nor a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// Emit the field as `z.unknown()`.
    #[default]
    Unknown,
    /// Leave the field out of the object shape.
    Omit,
}

/// Type mapping configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypesConfig {
    /// Policy for unrecognized field types.
    #[serde(default)]
    unknown: UnknownTypePolicy,

    /// Extra primitive mappings from a type name to a validator expression.
    ///
    /// Built-in primitives (`String`, `Int`, `Boolean`) cannot be overridden.
    #[serde(default)]
    primitives: IndexMap<String, String>,
}

impl TypesConfig {
    /// Creates a new [`TypesConfig`].
    pub fn new(unknown: UnknownTypePolicy, primitives: IndexMap<String, String>) -> Self {
        Self {
            unknown,
            primitives,
        }
    }

    /// Returns the policy for unrecognized types.
    pub fn unknown(&self) -> UnknownTypePolicy {
        self.unknown
    }

    /// Returns the extra primitive mappings.
    pub fn primitives(&self) -> &IndexMap<String, String> {
        &self.primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(!config.strict());
        assert_eq!(config.output().header(), DEFAULT_HEADER);
        assert_eq!(config.types().unknown(), UnknownTypePolicy::Unknown);
        assert!(config.types().primitives().is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.output().header(), DEFAULT_HEADER);
        assert_eq!(config.types().unknown(), UnknownTypePolicy::Unknown);
    }

    #[test]
    fn test_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            strict = true

            [output]
            header = "import { z } from 'zod';"

            [types]
            unknown = "omit"

            [types.primitives]
            DateTime = "z.coerce.date()"
            Float = "z.number()"
            "#,
        )
        .unwrap();

        assert!(config.strict());
        assert_eq!(config.output().header(), "import { z } from 'zod';");
        assert_eq!(config.types().unknown(), UnknownTypePolicy::Omit);

        let primitives: Vec<_> = config.types().primitives().keys().collect();
        assert_eq!(primitives, vec!["DateTime", "Float"]);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[types]\nunknown = \"drop\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_with_strict_only_enables() {
        let config = AppConfig::default().with_strict(true);
        assert!(config.strict());

        let config = config.with_strict(false);
        assert!(config.strict());
    }
}
