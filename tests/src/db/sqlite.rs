use crate::Setup;

use tempfile::TempDir;

/// Each test gets a database file in its own temporary directory, removed
/// when the setup is dropped.
pub struct SetupSqlite {
    dir: TempDir,
}

impl SetupSqlite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temporary directory"),
        }
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    fn url(&self) -> String {
        format!("sqlite:{}", self.dir.path().join("test.db").display())
    }
}
