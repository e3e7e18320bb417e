//! Mapping of declared field types to validator expressions.
//!
//! Resolution follows a fixed precedence:
//!
//! 1. Built-in primitives (`String`, `Int`, `Boolean`)
//! 2. Configured extra primitives
//! 3. Enum names, referenced as `<Name>Enum`
//! 4. Model names, referenced as `<Name>Schema`
//! 5. Anything else is unrecognized
//!
//! Primitives win even when an enum or model has the same name, and an enum
//! wins over a model of the same name.

use std::collections::HashSet;

use indexmap::IndexMap;

use zodgen_core::{declaration::DeclarationKind, schema::Schema};

use crate::config::{TypesConfig, UnknownTypePolicy};

/// Validator expression emitted for unrecognized types.
pub const UNKNOWN_EXPRESSION: &str = "z.unknown()";

const BUILTIN_PRIMITIVES: [(&str, &str); 3] = [
    ("String", "z.string()"),
    ("Int", "z.number()"),
    ("Boolean", "z.boolean()"),
];

fn builtin_primitive(field_type: &str) -> Option<&'static str> {
    BUILTIN_PRIMITIVES
        .iter()
        .find(|(name, _)| *name == field_type)
        .map(|(_, expression)| *expression)
}

/// Convert a field type to a validator expression.
///
/// This is the canonical mapping: built-in primitives, then enums, then
/// models, then [`UNKNOWN_EXPRESSION`]. It never fails and never returns an
/// empty string.
///
/// # Examples
///
/// ```
/// use zodgen::mapper::convert_type;
///
/// assert_eq!(convert_type("Boolean", &[], &[]), "z.boolean()");
/// assert_eq!(convert_type("Role", &["Role"], &[]), "RoleEnum");
/// assert_eq!(convert_type("User", &[], &["User"]), "UserSchema");
/// assert_eq!(convert_type("Foo", &[], &[]), "z.unknown()");
/// ```
pub fn convert_type(field_type: &str, enum_names: &[&str], model_names: &[&str]) -> String {
    if let Some(expression) = builtin_primitive(field_type) {
        return expression.to_string();
    }
    if enum_names.contains(&field_type) {
        return DeclarationKind::Enum.declared_name(field_type);
    }
    if model_names.contains(&field_type) {
        return DeclarationKind::Schema.declared_name(field_type);
    }
    UNKNOWN_EXPRESSION.to_string()
}

/// How a field type was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A primitive with its validator expression.
    Primitive(String),
    /// A reference to another declaration, by declared name.
    Reference {
        kind: DeclarationKind,
        name: String,
    },
    /// Neither a primitive, an enum nor a model.
    Unrecognized,
}

impl Resolution {
    /// Returns the validator expression, or `None` if the field should be omitted.
    pub fn expression(&self, unknown: UnknownTypePolicy) -> Option<String> {
        match self {
            Resolution::Primitive(expression) => Some(expression.clone()),
            Resolution::Reference { name, .. } => Some(name.clone()),
            Resolution::Unrecognized => match unknown {
                UnknownTypePolicy::Unknown => Some(UNKNOWN_EXPRESSION.to_string()),
                UnknownTypePolicy::Omit => None,
            },
        }
    }

    /// Returns the declared name this resolution refers to, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Resolution::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Type mapper bound to one schema and one configuration.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    primitives: &'a IndexMap<String, String>,
    unknown: UnknownTypePolicy,
    enums: HashSet<&'a str>,
    models: HashSet<&'a str>,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper that knows every enum and model of `schema`.
    pub fn new(schema: &'a Schema, config: &'a TypesConfig) -> Self {
        Self {
            primitives: config.primitives(),
            unknown: config.unknown(),
            enums: schema.enum_names().into_iter().collect(),
            models: schema.model_names().into_iter().collect(),
        }
    }

    /// Resolves a declared field type.
    pub fn resolve(&self, field_type: &str) -> Resolution {
        if let Some(expression) = builtin_primitive(field_type) {
            return Resolution::Primitive(expression.to_string());
        }
        if let Some(expression) = self.primitives.get(field_type) {
            return Resolution::Primitive(expression.clone());
        }

        let kind = if self.enums.contains(field_type) {
            DeclarationKind::Enum
        } else if self.models.contains(field_type) {
            DeclarationKind::Schema
        } else {
            return Resolution::Unrecognized;
        };

        Resolution::Reference {
            kind,
            name: kind.declared_name(field_type),
        }
    }

    /// Maps a declared field type to its validator expression.
    ///
    /// Returns `None` only for unrecognized types under
    /// [`UnknownTypePolicy::Omit`].
    pub fn map(&self, field_type: &str) -> Option<String> {
        self.resolve(field_type).expression(self.unknown)
    }

    /// Returns the policy for unrecognized types.
    pub fn unknown_policy(&self) -> UnknownTypePolicy {
        self.unknown
    }
}
