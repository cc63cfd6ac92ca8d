use crate::stmt::Value;

use std::{fmt, sync::Arc};

/// Describes one persistent attribute of a model.
///
/// A field is plain data: construction never fails and `column_type` is
/// passed to the database untouched.
#[derive(Clone)]
pub struct Field {
    /// Column name. Bound to the declared attribute name during schema
    /// derivation when left unset.
    pub name: Option<String>,

    pub kind: FieldKind,

    /// SQL type used when creating the table
    pub column_type: String,

    pub primary_key: bool,

    /// Substituted when a value is missing, see `Field::resolve_default`
    pub default: Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Text,
}

/// A field's default: either a fixed value or a factory called each time a
/// default is needed.
#[derive(Clone)]
pub enum Default {
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Field {
    fn new(kind: FieldKind, column_type: &str, default: Value) -> Self {
        Self {
            name: None,
            kind,
            column_type: column_type.to_string(),
            primary_key: false,
            default: Default::Value(default),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String, "varchar(100)", Value::Null)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer, "bigint", Value::I64(0))
    }

    pub fn float() -> Self {
        Self::new(FieldKind::Float, "real", Value::F64(0.0))
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean, "boolean", Value::Bool(false))
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text, "text", Value::Null)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    /// Mark the field as the primary key. Boolean and text fields never
    /// are, so the flag is ignored for them.
    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key && self.kind.may_be_key();
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Default::Value(value.into());
        self
    }

    pub fn default_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Default::Factory(Arc::new(factory));
        self
    }

    /// Column name, or the empty string before the field is bound.
    pub fn column_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Produce the default value, calling the factory if there is one.
    pub fn resolve_default(&self) -> Value {
        self.default.resolve()
    }
}

impl Default {
    pub fn resolve(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Self::Factory(_))
    }
}

impl FieldKind {
    pub fn may_be_key(self) -> bool {
        !matches!(self, Self::Boolean | Self::Text)
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::String => "StringField",
            Self::Integer => "IntegerField",
            Self::Float => "FloatField",
            Self::Boolean => "BooleanField",
            Self::Text => "TextField",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{},{}:{}>",
            self.kind.class_name(),
            self.column_type,
            self.column_name()
        )
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("column_type", &self.column_type)
            .field("primary_key", &self.primary_key)
            .field("default", &self.default)
            .finish()
    }
}

impl fmt::Debug for Default {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
