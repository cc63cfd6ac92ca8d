use crate::{Error, Result};

use tablet_core::{schema::placeholders, stmt::Value};

/// Filters, ordering, and limit for [`Db::find_all`](crate::Db::find_all).
///
/// ```
/// # use tablet::FindAll;
/// let query = FindAll::new()
///     .filter("`age` > ?", vec![18.into()])
///     .order_by("`name` desc")
///     .limit((10, 5));
/// ```
#[derive(Debug, Default, Clone)]
pub struct FindAll {
    filter: Option<String>,
    args: Vec<Value>,
    order_by: Option<String>,
    limit: Option<Value>,
}

impl FindAll {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `where` clause, without the keyword, and the values for its
    /// placeholders.
    pub fn filter(mut self, clause: impl Into<String>, args: Vec<Value>) -> Self {
        self.filter = Some(clause.into());
        self.args = args;
        self
    }

    /// An `order by` clause, without the keywords.
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Either a row count or an `(offset, count)` pair. Anything else is
    /// refused when the statement is built.
    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Append the clauses to `select` and collect the bound arguments.
    pub(crate) fn build(&self, select: &str) -> Result<(String, Vec<Value>)> {
        let mut sql = vec![select.to_string()];
        let mut args = self.args.clone();

        if let Some(filter) = &self.filter {
            sql.push("where".to_string());
            sql.push(filter.clone());
        }

        if let Some(order_by) = &self.order_by {
            sql.push("order by".to_string());
            sql.push(order_by.clone());
        }

        match &self.limit {
            // A zero or null limit means no limit
            None => {}
            Some(limit) if limit.is_falsy() => {}
            Some(limit @ Value::I64(_)) => {
                sql.push("limit".to_string());
                sql.push(placeholders(1));
                args.push(limit.clone());
            }
            Some(Value::List(pair)) if pair.len() == 2 => {
                sql.push("limit".to_string());
                sql.push(placeholders(2));
                args.extend(pair.iter().cloned());
            }
            Some(limit) => {
                return Err(Error::invalid_argument(format!(
                    "invalid limit value {limit:?}"
                )))
            }
        }

        Ok((sql.join(" "), args))
    }
}
