use crate::{Error, Result};

use tablet_core::{schema::Field, stmt::Value};

/// A Rust type that can be stored in a single column.
pub trait Primitive: Sized {
    /// The field descriptor used when the model does not pick one.
    fn field() -> Field;

    /// Load a column value. Null loads as the type's empty value; use
    /// `Option<T>` to observe it.
    fn load(value: Value) -> Result<Self>;

    /// The value to write, or `None` if the field is unassigned.
    fn to_value(&self) -> Option<Value>;
}

impl Primitive for String {
    fn field() -> Field {
        Field::string()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(String::new()),
            value => value.into_string(),
        }
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }
}

impl Primitive for i64 {
    fn field() -> Field {
        Field::integer()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(0),
            value => value.into_i64(),
        }
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::I64(*self))
    }
}

impl Primitive for i32 {
    fn field() -> Field {
        Field::integer()
    }

    fn load(value: Value) -> Result<Self> {
        let v = i64::load(value)?;
        i32::try_from(v).map_err(|_| Error::type_conversion(Value::I64(v), "i32"))
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::I64(*self as i64))
    }
}

impl Primitive for f64 {
    fn field() -> Field {
        Field::float()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(0.0),
            value => value.into_f64(),
        }
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::F64(*self))
    }
}

impl Primitive for bool {
    fn field() -> Field {
        Field::boolean()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(false),
            value => value.into_bool(),
        }
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

impl<T: Primitive> Primitive for Option<T> {
    fn field() -> Field {
        T::field()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(T::load(value)?)),
        }
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }
}
