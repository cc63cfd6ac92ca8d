use crate::{
    logging_driver::{DriverOp, LoggingDriver},
    ExecLog, Setup,
};
use std::sync::{Arc, Mutex};
use tablet::{db::Connect, Db};

/// Per-test state: the backend setup and the log of driver operations of the
/// database built from it.
pub struct DbTest {
    setup: Box<dyn Setup>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new(setup: impl Setup) -> Self {
        crate::init_tracing();

        Self {
            setup: Box::new(setup),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to setup a database with models, returns Result for error handling
    pub async fn try_setup_db(&mut self, mut builder: tablet::db::Builder) -> tablet::Result<Db> {
        let driver = Connect::new(&self.setup.url())?;

        // Always wrap with logging, using our existing ops_log
        let logging_driver = LoggingDriver::new(Box::new(driver));
        self.ops_log = logging_driver.ops_log_handle();

        let db = builder.build(logging_driver).await?;
        self.setup.reset(&db).await?;
        db.push_schema().await?;

        Ok(db)
    }

    /// Setup a database with models, always with logging enabled
    pub async fn setup_db(&mut self, builder: tablet::db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// The URL the setup connects to
    pub fn url(&self) -> String {
        self.setup.url()
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}
