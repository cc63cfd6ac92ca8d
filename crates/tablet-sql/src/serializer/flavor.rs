use super::Serializer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sqlite,
    Mysql,
}

impl Flavor {
    /// Whether backslash escapes the next character inside string literals.
    pub(super) fn backslash_escapes(self) -> bool {
        matches!(self, Flavor::Mysql)
    }
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }
}
