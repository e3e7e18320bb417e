//! Integration tests for the SchemaBuilder API
//!
//! These tests drive the whole pipeline from schema text to generated output.

use indexmap::IndexMap;

use zodgen::{
    SchemaBuilder, ZodgenError,
    config::{AppConfig, OutputConfig, TypesConfig, UnknownTypePolicy},
    mapper::convert_type,
    schema::FieldDef,
};
use zodgen_parser::error::ErrorCode;

fn generate(builder: &SchemaBuilder, source: &str) -> String {
    let parsed = builder.parse(source).expect("Failed to parse schema");
    builder
        .generate(parsed.schema())
        .expect("Failed to generate declarations")
}

fn position(output: &str, needle: &str) -> usize {
    output
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` missing from output:\n{output}"))
}

#[test]
fn test_builder_api_exists() {
    let _builder = SchemaBuilder::default();
}

#[test]
fn test_enum_then_model() {
    let source = r#"
enum UserRole {
  ADMIN
  USER
}

model User {
  id   Int    @id
  name String
  role UserRole
}
"#;

    let output = generate(&SchemaBuilder::default(), source);

    assert!(output.starts_with("import * as z from 'zod';\n\n"));
    assert!(position(&output, "export const UserRoleEnum") < position(&output, "export const UserSchema"));
    assert!(output.contains("  role: UserRoleEnum,\n"));
    assert!(output.contains("z.literal('ADMIN'),\n  z.literal('USER')"));
}

#[test]
fn test_model_before_enum() {
    let source = r#"
model User {
  id   Int
  role UserRole
}

enum UserRole {
  ADMIN
  USER
}
"#;

    let output = generate(&SchemaBuilder::default(), source);

    assert!(position(&output, "export const UserRoleEnum") < position(&output, "export const UserSchema"));
}

#[test]
fn test_attribute_lines_are_dropped() {
    let source = r#"
model Account {
  id   Int
  @ignoreThisField
  name String
}
"#;

    let builder = SchemaBuilder::default();
    let parsed = builder.parse(source).expect("Failed to parse schema");

    let fields = parsed.schema().models()[0].fields();
    assert_eq!(fields, [FieldDef::new("id", "Int"), FieldDef::new("name", "String")]);
    assert!(parsed.warnings().is_empty());
}

#[test]
fn test_convert_type_fallbacks() {
    assert_eq!(convert_type("Boolean", &[], &[]), "z.boolean()");
    assert_eq!(convert_type("Foo", &[], &[]), "z.unknown()");
}

#[test]
fn test_empty_input_is_header_only() {
    let output = generate(&SchemaBuilder::default(), "// nothing to see here\n");

    assert_eq!(output, "import * as z from 'zod';\n");
}

#[test]
fn test_model_references_are_ordered() {
    let source = r#"
model Post {
  title  String
  author User
}

model User {
  name String
}
"#;

    let output = generate(&SchemaBuilder::default(), source);

    assert!(position(&output, "export const UserSchema") < position(&output, "export const PostSchema"));
    assert!(output.contains("  author: UserSchema,\n"));
}

#[test]
fn test_cyclic_models_fail() {
    let source = r#"
model A {
  b B
}

model B {
  a A
}
"#;

    let builder = SchemaBuilder::default();
    let parsed = builder.parse(source).expect("Failed to parse schema");
    let err = builder.generate(parsed.schema()).unwrap_err();

    match err {
        ZodgenError::CyclicDependency(cycle) => {
            assert_eq!(cycle.name(), "ASchema");
            assert_eq!(cycle.path(), ["ASchema", "BSchema", "ASchema"]);
        }
        other => panic!("Expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_self_reference_is_allowed() {
    let source = "model Node {\n  parent Node\n}\n";

    let output = generate(&SchemaBuilder::default(), source);

    assert!(output.contains("  parent: NodeSchema,\n"));
}

#[test]
fn test_unknown_types_fall_back() {
    let source = "model Event {\n  at DateTime\n}\n";

    let output = generate(&SchemaBuilder::default(), source);

    assert!(output.contains("  at: z.unknown(),\n"));
}

#[test]
fn test_builder_with_config() {
    let mut primitives = IndexMap::new();
    primitives.insert("DateTime".to_string(), "z.coerce.date()".to_string());
    let config = AppConfig::new(
        false,
        OutputConfig::new("import { z } from 'zod';"),
        TypesConfig::new(UnknownTypePolicy::Omit, primitives),
    );
    let source = "model Event {\n  at   DateTime\n  blob Bytes\n  name String\n}\n";

    let output = generate(&SchemaBuilder::new(config), source);

    assert_eq!(
        output,
        "import { z } from 'zod';\n\nexport const EventSchema = z.object({\n  at: z.coerce.date(),\n  name: z.string(),\n});\n"
    );
}

#[test]
fn test_warnings_are_returned() {
    let source = "model User {\n  id Int\n  orphan\n}\n";

    let parsed = SchemaBuilder::default()
        .parse(source)
        .expect("Failed to parse schema");

    assert_eq!(parsed.warnings().len(), 1);
    assert_eq!(parsed.warnings()[0].code(), Some(ErrorCode::E101));
    assert_eq!(parsed.schema().models()[0].fields().len(), 1);
}

#[test]
fn test_strict_mode_rejects_warnings() {
    let config = AppConfig::default().with_strict(true);
    let source = "model User {\n  id Int\n  orphan\n}\n";

    let err = SchemaBuilder::new(config).parse(source).unwrap_err();

    match err {
        ZodgenError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_generate_zod_schema() {
    let output = zodgen::generate_zod_schema("enum Flag { ON }").expect("Failed to generate");

    assert_eq!(
        output,
        "import * as z from 'zod';\n\nexport const FlagEnum = z.union([\n  z.literal('ON')\n]);\n"
    );
}
