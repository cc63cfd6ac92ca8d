
pub mod db;
mod db_test;
mod exec_log;
mod log_capture;
mod logging_driver;

// Re-export for use in macros - needs to be public for macro expansion
pub use db_test::DbTest;
pub use exec_log::ExecLog;
pub use log_capture::LogCapture;
pub use logging_driver::{DriverOp, LoggingDriver};

use tablet::Db;

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    /// URL of the database the test runs against.
    fn url(&self) -> String;

    /// Drop the tables of the registered models so every test starts from an
    /// empty database.
    async fn reset(&self, _db: &Db) -> tablet::Result<()> {
        Ok(())
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
/// Filtered by `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
