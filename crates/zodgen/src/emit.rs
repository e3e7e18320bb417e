//! Declaration emission.
//!
//! The [`Emitter`] turns each enum and model of a [`Schema`] into a
//! [`DeclarationBlock`]. Reference sets are filled in here, from the
//! resolved field types, so the sorter works on structured values.

use log::{debug, info};

use zodgen_core::{
    declaration::{DeclarationBlock, DeclarationKind},
    schema::{EnumDef, ModelDef, Schema},
};

use crate::{
    config::TypesConfig,
    mapper::{Resolution, TypeMapper},
};

/// Emits declaration blocks for one schema.
#[derive(Debug)]
pub struct Emitter<'a> {
    schema: &'a Schema,
    mapper: TypeMapper<'a>,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter for `schema`.
    pub fn new(schema: &'a Schema, config: &'a TypesConfig) -> Self {
        Self {
            schema,
            mapper: TypeMapper::new(schema, config),
        }
    }

    /// Emits every enum, then every model, in source order.
    pub fn emit(&self) -> Vec<DeclarationBlock> {
        let enums = self.schema.enums().iter().map(|def| self.emit_enum(def));
        let models = self.schema.models().iter().map(|def| self.emit_model(def));
        let blocks: Vec<_> = enums.chain(models).collect();

        debug!(declarations = blocks.len(); "Declarations emitted");
        blocks
    }

    /// Emits a union of literals for an enum.
    ///
    /// An enum without values accepts nothing and is emitted as `z.never()`.
    pub fn emit_enum(&self, def: &EnumDef) -> DeclarationBlock {
        let kind = DeclarationKind::Enum;
        let name = kind.declared_name(def.name());

        let expression = if def.is_empty() {
            "z.never()".to_string()
        } else {
            let literals: Vec<String> = def
                .values()
                .iter()
                .map(|value| format!("z.literal({})", quote(value)))
                .collect();
            format!("z.union([\n  {}\n])", literals.join(",\n  "))
        };

        let body = format!("export const {name} = {expression};");
        DeclarationBlock::new(name, kind, body, [])
    }

    /// Emits an object shape for a model.
    ///
    /// Fields whose type maps to no expression are left out.
    pub fn emit_model(&self, def: &ModelDef) -> DeclarationBlock {
        let kind = DeclarationKind::Schema;
        let name = kind.declared_name(def.name());

        let mut entries = Vec::with_capacity(def.fields().len());
        let mut references = Vec::new();
        for field in def.fields() {
            let resolution = self.mapper.resolve(field.field_type());
            if resolution == Resolution::Unrecognized {
                info!(
                    model = def.name(),
                    field = field.name(),
                    field_type = field.field_type(),
                    policy:? = self.mapper.unknown_policy();
                    "Unrecognized field type"
                );
            }

            let Some(expression) = resolution.expression(self.mapper.unknown_policy()) else {
                continue;
            };
            if let Some(reference) = resolution.reference() {
                references.push(reference.to_string());
            }
            entries.push(format!("  {}: {expression},\n", field.name()));
        }

        let body = format!("export const {name} = z.object({{\n{}}});", entries.concat());
        DeclarationBlock::new(name, kind, body, references)
    }
}

/// Quote a value as a single-quoted TypeScript string literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Render the output text: the header line, then each block, separated by blank lines.
///
/// An empty header is left out entirely.
///
/// # Examples
///
/// ```
/// use zodgen::emit::render;
///
/// assert_eq!(render("import * as z from 'zod';", &[]), "import * as z from 'zod';\n");
/// ```
pub fn render(header: &str, blocks: &[DeclarationBlock]) -> String {
    let header = (!header.is_empty()).then_some(header);
    let parts: Vec<&str> = header
        .into_iter()
        .chain(blocks.iter().map(DeclarationBlock::body))
        .collect();

    if parts.is_empty() {
        return String::new();
    }
    let mut output = parts.join("\n\n");
    output.push('\n');
    output
}
