use crate::stmt::Row;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> crate::Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => crate::bail!("expected a row count, driver returned rows"),
        }
    }

    pub fn into_values(self) -> crate::Result<Vec<Row>> {
        match self {
            Self::Values(values) => Ok(values),
            Self::Count(_) => crate::bail!("expected rows, driver returned a row count"),
        }
    }
}
