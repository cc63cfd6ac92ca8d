use super::Error;

/// Error when a model declares more than one primary key field.
#[derive(Debug)]
pub(super) struct DuplicateKey {
    table: Box<str>,
    field: Box<str>,
}

impl std::error::Error for DuplicateKey {}

impl core::fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate primary key `{}` in table `{}`",
            self.field, self.table
        )
    }
}

impl Error {
    /// Creates a duplicate primary key error.
    ///
    /// Raised by schema derivation when `field` is marked as a primary key but
    /// the model already has one.
    pub fn duplicate_key(table: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateKey(DuplicateKey {
            table: table.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate primary key error.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateKey(_))
    }
}
