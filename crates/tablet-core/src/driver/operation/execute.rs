use super::Operation;

use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct Execute {
    /// SQL text, with `?` placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,
}

impl Execute {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl From<Execute> for Operation {
    fn from(value: Execute) -> Self {
        Self::Execute(value)
    }
}
