//! Structured schema definitions produced by the block parser.
//!
//! These types are the parsed form of the input text. They are created once
//! by the parser and only read afterwards by the type mapper and emitter.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ extract
//! Block Fragments
//!     ↓ parse
//! Schema (these types)
//!     ↓ emit
//! Declaration Blocks
//!     ↓ sort + render
//! Generated Source
//! ```

/// A named set of literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    values: Vec<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodgen_core::schema::EnumDef;
    ///
    /// let role = EnumDef::new("UserRole", vec!["ADMIN".to_string(), "USER".to_string()]);
    /// assert_eq!(role.name(), "UserRole");
    /// assert_eq!(role.values().len(), 2);
    /// ```
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values in source order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns `true` if the enum declares no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single `name Type` field of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    field_type: String,
}

impl FieldDef {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type name.
    pub fn field_type(&self) -> &str {
        &self.field_type
    }
}

/// A named record type with fields in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDef {
    name: String,
    fields: Vec<FieldDef>,
}

impl ModelDef {
    /// Creates a new model definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use zodgen_core::schema::{FieldDef, ModelDef};
    ///
    /// let user = ModelDef::new("User", vec![FieldDef::new("id", "Int")]);
    /// assert_eq!(user.fields()[0].field_type(), "Int");
    /// ```
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in source order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// All enums and models parsed from one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    enums: Vec<EnumDef>,
    models: Vec<ModelDef>,
}

impl Schema {
    /// Creates a schema from parsed enums and models.
    pub fn new(enums: Vec<EnumDef>, models: Vec<ModelDef>) -> Self {
        Self { enums, models }
    }

    /// Returns the enums in source order.
    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }

    /// Returns the models in source order.
    pub fn models(&self) -> &[ModelDef] {
        &self.models
    }

    /// Returns the names of all enums.
    pub fn enum_names(&self) -> Vec<&str> {
        self.enums.iter().map(EnumDef::name).collect()
    }

    /// Returns the names of all models.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(ModelDef::name).collect()
    }

    /// Returns `true` if the schema has neither enums nor models.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.models.is_empty()
    }
}
