use crate::Setup;

use tablet::Db;

/// Runs against the server named by `TABLET_TEST_MYSQL_URL`.
///
/// Tests share one database and reuse table names, so run them with
/// `--test-threads=1`.
pub struct SetupMySQL {
    url: String,
}

impl SetupMySQL {
    pub fn new() -> Self {
        Self {
            url: std::env::var("TABLET_TEST_MYSQL_URL")
                .unwrap_or_else(|_| "mysql://localhost:3306/tablet_test".to_string()),
        }
    }
}

impl Default for SetupMySQL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupMySQL {
    fn url(&self) -> String {
        self.url.clone()
    }

    async fn reset(&self, db: &Db) -> tablet::Result<()> {
        for schema in db.schemas() {
            let sql = format!("drop table if exists `{}`", schema.table_name);
            db.execute(&sql, vec![], true).await?;
        }

        Ok(())
    }
}
