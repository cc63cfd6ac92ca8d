mod execute;
pub use execute::Execute;

mod query;
pub use query::Query;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a statement that returns rows
    Query(Query),

    /// Run a statement that returns an affected-row count
    Execute(Execute),

    /// Start, commit, or roll back an explicit transaction
    Transaction(Transaction),
}

impl Operation {
    /// The SQL text carried by the operation, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Query(op) => Some(&op.sql),
            Self::Execute(op) => Some(&op.sql),
            Self::Transaction(_) => None,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}
