use tablet_core::stmt::Value;

/// Decides when a field's declared default replaces the value a model
/// instance carries at save, update, or remove time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Substitute the default when the field is unassigned or holds a falsy
    /// value: null, zero, the empty string, `false`.
    ///
    /// An explicit `0` on an integer field is therefore replaced by the
    /// declared default.
    #[default]
    Falsy,

    /// Substitute the default only when the field was never assigned.
    Unassigned,
}

impl DefaultPolicy {
    /// Returns `true` when `value` should be replaced by the default.
    pub fn wants_default(self, value: Option<&Value>) -> bool {
        match self {
            Self::Falsy => value.map_or(true, Value::is_falsy),
            Self::Unassigned => value.is_none(),
        }
    }
}
