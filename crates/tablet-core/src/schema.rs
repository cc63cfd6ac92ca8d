mod builder;
pub use builder::Builder;

mod field;
pub use field::{Default, Field, FieldKind};

mod templates;
pub use templates::{placeholders, Templates};

use indexmap::IndexMap;

/// The relational mapping of one model type.
///
/// A schema is derived once per model and never changes afterwards. Every
/// instance of the model, on every task, reads the same templates.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Name of the model type
    pub name: String,

    /// Name of the backing table
    pub table_name: String,

    /// Every field, primary key included, keyed by declared name in
    /// declaration order.
    pub mapping: IndexMap<String, Field>,

    /// Names of the non-key fields, in declaration order
    pub fields: Vec<String>,

    /// Name of the primary key field
    pub primary_key: String,

    /// SQL statements generated for the model
    pub templates: Templates,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.mapping.get(name)
    }

    /// The primary key field descriptor.
    pub fn primary_key_field(&self) -> &Field {
        // `build` refuses to produce a schema without one
        &self.mapping[&self.primary_key]
    }

    /// Ordinary fields followed by the primary key. This is the column order
    /// of the select and insert templates.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.primary_key.as_str()))
    }
}
