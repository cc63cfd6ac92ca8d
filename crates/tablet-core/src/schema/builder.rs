use super::{Field, Schema, Templates};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Collects a model's fields and derives its [`Schema`].
#[derive(Debug)]
pub struct Builder {
    /// Model type name
    name: String,

    /// Table name override
    table: Option<String>,

    /// Declared fields, in order
    fields: Vec<(String, Field)>,
}

impl Builder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: vec![],
        }
    }

    /// Use `table` instead of the lower-cased type name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    /// Derive the schema.
    ///
    /// Fails when no field, or more than one field, is the primary key, and
    /// when a field name is declared twice.
    pub fn build(self) -> Result<Schema> {
        let table_name = self
            .table
            .unwrap_or_else(|| self.name.to_lowercase());

        tracing::debug!(model = %self.name, table = %table_name, "found model");

        let mut mapping = IndexMap::with_capacity(self.fields.len());
        let mut fields = vec![];
        let mut primary_key: Option<String> = None;

        for (name, mut field) in self.fields {
            if mapping.contains_key(&name) {
                return Err(Error::invalid_argument(format!(
                    "field `{name}` declared twice on model `{}`",
                    self.name
                )));
            }

            tracing::debug!(model = %self.name, "found mapping: {name} ==> {field}");

            if field.name.is_none() {
                field.name = Some(name.clone());
            }

            if field.primary_key {
                if primary_key.is_some() {
                    return Err(Error::duplicate_key(&table_name, name));
                }
                primary_key = Some(name.clone());
            } else {
                fields.push(name.clone());
            }

            mapping.insert(name, field);
        }

        let Some(primary_key) = primary_key else {
            return Err(Error::missing_primary_key(&table_name));
        };

        let templates = Templates::new(&table_name, &fields, &primary_key, &mapping);

        Ok(Schema {
            name: self.name,
            table_name,
            mapping,
            fields,
            primary_key,
            templates,
        })
    }
}
