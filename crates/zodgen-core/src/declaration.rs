//! Generated declarations and the references between them.
//!
//! A [`DeclarationBlock`] is one `export const` statement of the generated
//! output. It keeps the set of other declarations its body refers to so the
//! sorter never has to re-derive the dependency graph from rendered text.

use std::fmt;

use indexmap::IndexSet;

/// The kind of a generated declaration.
///
/// The kind determines the suffix appended to the entity name to form the
/// declared constant: `UserRole` becomes `UserRoleEnum`, `User` becomes
/// `UserSchema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A union of literals generated from an enum.
    Enum,
    /// An object shape generated from a model.
    Schema,
}

impl DeclarationKind {
    /// Returns the suffix for this kind.
    pub fn suffix(&self) -> &'static str {
        match self {
            DeclarationKind::Enum => "Enum",
            DeclarationKind::Schema => "Schema",
        }
    }

    /// Returns the declared constant name for an entity of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodgen_core::declaration::DeclarationKind;
    ///
    /// assert_eq!(DeclarationKind::Enum.declared_name("UserRole"), "UserRoleEnum");
    /// assert_eq!(DeclarationKind::Schema.declared_name("User"), "UserSchema");
    /// ```
    pub fn declared_name(&self, entity: &str) -> String {
        format!("{entity}{}", self.suffix())
    }

    /// Splits a declared constant name into its entity name and kind.
    ///
    /// Returns `None` when the name carries neither suffix or nothing
    /// precedes the suffix.
    pub fn split_declared_name(name: &str) -> Option<(&str, DeclarationKind)> {
        [DeclarationKind::Enum, DeclarationKind::Schema]
            .into_iter()
            .find_map(|kind| {
                name.strip_suffix(kind.suffix())
                    .filter(|entity| !entity.is_empty())
                    .map(|entity| (entity, kind))
            })
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One generated output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationBlock {
    name: String,
    kind: DeclarationKind,
    body: String,
    references: IndexSet<String>,
}

impl DeclarationBlock {
    /// Creates a new declaration block.
    ///
    /// # Arguments
    ///
    /// * `name` - Declared constant name, e.g. `UserSchema`
    /// * `kind` - Whether the block was generated from an enum or a model
    /// * `body` - Full declaration text, from `export const` through the closing `;`
    /// * `references` - Declared names of other blocks used by `body`
    ///
    /// A reference to the block's own name is discarded.
    pub fn new(
        name: impl Into<String>,
        kind: DeclarationKind,
        body: impl Into<String>,
        references: impl IntoIterator<Item = String>,
    ) -> Self {
        let name = name.into();
        let references = references
            .into_iter()
            .filter(|reference| *reference != name)
            .collect();
        Self {
            name,
            kind,
            body: body.into(),
            references,
        }
    }

    /// Returns the declared constant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declaration kind.
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Returns the full declaration text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the declared names this block refers to, in first-use order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }

    /// Returns `true` if this block refers to the declaration `name`.
    pub fn references_name(&self, name: &str) -> bool {
        self.references.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_name() {
        assert_eq!(DeclarationKind::Enum.declared_name("Role"), "RoleEnum");
        assert_eq!(DeclarationKind::Schema.declared_name("Post"), "PostSchema");
    }

    #[test]
    fn test_split_declared_name() {
        assert_eq!(
            DeclarationKind::split_declared_name("UserRoleEnum"),
            Some(("UserRole", DeclarationKind::Enum))
        );
        assert_eq!(
            DeclarationKind::split_declared_name("UserSchema"),
            Some(("User", DeclarationKind::Schema))
        );
        assert_eq!(DeclarationKind::split_declared_name("Schema"), None);
        assert_eq!(DeclarationKind::split_declared_name("User"), None);
    }

    #[test]
    fn test_self_reference_is_dropped() {
        let block = DeclarationBlock::new(
            "NodeSchema",
            DeclarationKind::Schema,
            "export const NodeSchema = z.object({\n  parent: NodeSchema,\n});",
            ["NodeSchema".to_string(), "TagEnum".to_string()],
        );

        assert_eq!(block.references().collect::<Vec<_>>(), vec!["TagEnum"]);
        assert!(!block.references_name("NodeSchema"));
        assert!(block.references_name("TagEnum"));
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let block = DeclarationBlock::new(
            "PostSchema",
            DeclarationKind::Schema,
            "",
            [
                "UserSchema".to_string(),
                "TagEnum".to_string(),
                "UserSchema".to_string(),
            ],
        );

        assert_eq!(
            block.references().collect::<Vec<_>>(),
            vec!["UserSchema", "TagEnum"]
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DeclarationKind::Enum.to_string(), "Enum");
        assert_eq!(DeclarationKind::Schema.to_string(), "Schema");
    }
}
