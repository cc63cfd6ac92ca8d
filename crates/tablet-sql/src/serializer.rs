mod flavor;
pub use flavor::Flavor;

mod placeholder;

use tablet_core::driver::operation::Transaction;

/// Rewrites portable SQL text into a specific dialect.
///
/// Statements are written with `?` placeholders and backtick-quoted
/// identifiers, which both MySQL and SQLite accept. The serializer rewrites
/// placeholders into whatever the target database expects, leaving quoted
/// literals and comments alone.
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

impl Serializer {
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Translate `sql` to the flavor's placeholder syntax.
    pub fn serialize(&self, sql: &str) -> String {
        placeholder::translate(sql, self.flavor)
    }

    /// Number of `?` placeholders in `sql`, ignoring any inside literals,
    /// quoted identifiers, or comments.
    pub fn count_placeholders(&self, sql: &str) -> usize {
        placeholder::count(sql, self.flavor)
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn serialize_transaction(&self, op: Transaction) -> &'static str {
        match op {
            Transaction::Start => match self.flavor {
                Flavor::Mysql => "START TRANSACTION",
                Flavor::Sqlite => "BEGIN",
            },
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
    }
}
