use mysql_async::{prelude::ToValue, Params, Value as SqlValue};
use tablet_core::{stmt::Value as CoreValue, Error, Result};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Convert bind parameters into positional MySQL params.
    pub fn params(values: Vec<CoreValue>) -> Result<Params> {
        if values.is_empty() {
            return Ok(Params::Empty);
        }

        values
            .into_iter()
            .map(|value| match value {
                CoreValue::List(_) => Err(Error::invalid_argument(format!(
                    "cannot bind {value} as a single parameter"
                ))),
                value => Ok(Value(value).to_value()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Params::Positional)
    }

    /// Converts this MySQL driver value into the core Tablet value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a column value read from a row.
    pub fn from_sql(value: Option<SqlValue>) -> Self {
        let core_value = match value {
            None | Some(SqlValue::NULL) => CoreValue::Null,
            Some(SqlValue::Int(v)) => CoreValue::I64(v),
            Some(SqlValue::UInt(v)) => match i64::try_from(v) {
                Ok(v) => CoreValue::I64(v),
                Err(_) => CoreValue::String(v.to_string()),
            },
            Some(SqlValue::Float(v)) => CoreValue::F64(v as f64),
            Some(SqlValue::Double(v)) => CoreValue::F64(v),
            Some(SqlValue::Bytes(bytes)) => match String::from_utf8(bytes) {
                Ok(s) => CoreValue::String(s),
                Err(err) => CoreValue::Bytes(err.into_bytes()),
            },
            // Dates and times come back in their SQL literal form
            Some(value @ (SqlValue::Date(..) | SqlValue::Time(..))) => {
                CoreValue::String(value.as_sql(true).trim_matches('\'').to_string())
            }
        };

        Value(core_value)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> SqlValue {
        match &self.0 {
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::Null => SqlValue::NULL,
            // Refused by `Value::params` before reaching here
            CoreValue::List(_) => SqlValue::NULL,
        }
    }
}
