use crate::{Record, Result};

use tablet_core::Schema;

/// A type persisted as one row of one table.
///
/// Implemented by `#[derive(Model)]`. The generated code also adds inherent
/// `find`, `find_all`, `find_number`, `save`, `update`, and `remove` methods
/// that forward to [`Db`](crate::Db).
pub trait Model: Sized + Send + Sync + 'static {
    /// The model's relational mapping.
    ///
    /// Derived once on first call. An invalid declaration (no primary key,
    /// two primary keys) fails here, and keeps failing with the same error
    /// on every later call.
    fn schema() -> Result<&'static Schema>;

    /// Load an instance of the model, populating fields from the record.
    ///
    /// Fields missing from the record take their type's empty value.
    fn load(record: Record) -> Result<Self>;

    /// The instance's assigned fields. Fields holding `None` are omitted.
    fn record(&self) -> Record;
}
