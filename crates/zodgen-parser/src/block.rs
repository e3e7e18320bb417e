//! Parsing of extracted fragments into structured definitions.
//!
//! Both parsers return `None` when a fragment does not have the
//! `<keyword> <Name> { ... }` shape. That cannot happen for fragments coming
//! out of [`extract`](crate::extract::extract); callers still report it as a
//! malformed block instead of panicking.

use winnow::{Parser as _, stream::LocatingSlice};

use zodgen_core::schema::{EnumDef, FieldDef, ModelDef};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    extract::Fragment,
    grammar::{self, BlockKind, RawBlock},
    span::Span,
};

/// Lines whose first non-whitespace character is this marker are attributes.
pub const ATTRIBUTE_MARKER: char = '@';

fn parse_raw<'src>(fragment: &Fragment<'src>, kind: BlockKind) -> Option<RawBlock<'src>> {
    let mut input = LocatingSlice::new(fragment.text());
    let raw = grammar::block.parse_next(&mut input).ok()?;
    (raw.kind == kind).then_some(raw)
}

/// Parse an enum fragment.
///
/// The body is split on whitespace; every token becomes one value.
///
/// # Example
///
/// ```
/// # use zodgen_parser::{block::parse_enum, extract::Fragment, BlockKind};
///
/// let fragment = Fragment::new(BlockKind::Enum, "enum Role {\n  ADMIN\n  USER\n}", 0);
/// let role = parse_enum(&fragment).expect("well-formed enum");
///
/// assert_eq!(role.name(), "Role");
/// assert_eq!(role.values(), ["ADMIN", "USER"]);
/// ```
pub fn parse_enum(fragment: &Fragment<'_>) -> Option<EnumDef> {
    let raw = parse_raw(fragment, BlockKind::Enum)?;
    let values = raw.body.split_whitespace().map(str::to_string).collect();
    Some(EnumDef::new(raw.name, values))
}

/// Parse a model fragment.
///
/// Each non-blank body line that does not start with [`ATTRIBUTE_MARKER`]
/// is a field: the first token is its name, the second its type, anything
/// after is ignored. A line with a single token is dropped and an `E101`
/// warning is emitted to `diagnostics`; the rest of the model is unaffected.
pub fn parse_model(
    fragment: &Fragment<'_>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<ModelDef> {
    let raw = parse_raw(fragment, BlockKind::Model)?;
    let mut offset = raw.body_span.shift(fragment.span().start()).start();
    let mut fields = Vec::new();

    for line in raw.body.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let content = line.trim();
        if content.is_empty() || content.starts_with(ATTRIBUTE_MARKER) {
            continue;
        }

        let mut tokens = content.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(name), Some(field_type)) => fields.push(FieldDef::new(name, field_type)),
            _ => {
                let indent = line.len() - line.trim_start().len();
                diagnostics.emit(
                    Diagnostic::warning(format!(
                        "field line `{content}` in model `{}` has no type",
                        raw.name
                    ))
                    .with_code(ErrorCode::E101)
                    .with_label(
                        Span::new(indent..indent + content.len()).shift(line_start),
                        "expected `<name> <Type>`",
                    )
                    .with_help(
                        "add a type after the field name, or start the line with `@` if it is an attribute",
                    ),
                );
            }
        }
    }

    Some(ModelDef::new(raw.name, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> (Option<ModelDef>, Vec<Diagnostic>) {
        let mut diagnostics = DiagnosticCollector::new();
        let fragment = Fragment::new(BlockKind::Model, text, 0);
        let model = parse_model(&fragment, &mut diagnostics);
        (model, diagnostics.finish().expect("only warnings"))
    }

    #[test]
    fn test_parse_enum_values_in_order() {
        let fragment = Fragment::new(BlockKind::Enum, "enum UserRole { ADMIN USER }", 0);
        let role = parse_enum(&fragment).unwrap();

        assert_eq!(role.name(), "UserRole");
        assert_eq!(role.values(), ["ADMIN", "USER"]);
    }

    #[test]
    fn test_parse_enum_trims_multiline_values() {
        let fragment = Fragment::new(BlockKind::Enum, "enum Status {\n\tACTIVE  \r\n  DELETED\n}", 0);
        let status = parse_enum(&fragment).unwrap();

        assert_eq!(status.values(), ["ACTIVE", "DELETED"]);
    }

    #[test]
    fn test_parse_empty_enum() {
        let fragment = Fragment::new(BlockKind::Enum, "enum Empty {}", 0);
        let empty = parse_enum(&fragment).unwrap();

        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_enum_rejects_model_fragment() {
        let fragment = Fragment::new(BlockKind::Enum, "model User { id Int }", 0);

        assert!(parse_enum(&fragment).is_none());
    }

    #[test]
    fn test_parse_enum_rejects_malformed_fragment() {
        let fragment = Fragment::new(BlockKind::Enum, "enum { A B }", 0);

        assert!(parse_enum(&fragment).is_none());
    }

    #[test]
    fn test_parse_model_fields_in_order() {
        let (user, warnings) = model("model User {\n  id Int\n  name String\n}");
        let user = user.unwrap();

        assert_eq!(user.name(), "User");
        assert_eq!(
            user.fields(),
            [FieldDef::new("id", "Int"), FieldDef::new("name", "String")]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_model_skips_attribute_lines() {
        let (user, warnings) =
            model("model User {\n  id Int @id\n  @ignoreThisField\n  @@index([id])\n  name String\n}");

        assert_eq!(
            user.unwrap().fields(),
            [FieldDef::new("id", "Int"), FieldDef::new("name", "String")]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_model_drops_malformed_line() {
        let source = "model User {\n  id Int\n  orphan\n  name String\n}";
        let (user, warnings) = model(source);

        assert_eq!(user.unwrap().fields().len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E101));
        assert_eq!(warnings[0].labels()[0].span().slice(source), Some("orphan"));
    }

    #[test]
    fn test_parse_model_single_line() {
        let (user, _) = model("model User { id Int }");

        assert_eq!(user.unwrap().fields(), [FieldDef::new("id", "Int")]);
    }

    #[test]
    fn test_parse_model_spans_are_absolute() {
        let source = "enum A { X }\nmodel User {\n  broken\n}";
        let mut diagnostics = DiagnosticCollector::new();
        let fragment = Fragment::new(BlockKind::Model, &source[13..], 13);

        parse_model(&fragment, &mut diagnostics).unwrap();

        let warnings = diagnostics.finish().unwrap();
        assert_eq!(warnings[0].labels()[0].span().slice(source), Some("broken"));
    }

    #[test]
    fn test_parse_empty_model() {
        let (empty, warnings) = model("model Empty {\n}");

        assert!(empty.unwrap().fields().is_empty());
        assert!(warnings.is_empty());
    }
}
