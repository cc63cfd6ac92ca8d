use super::Operation;

use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct Query {
    /// SQL text, with `?` placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,

    /// Fetch at most this many rows. `None` fetches all of them.
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
