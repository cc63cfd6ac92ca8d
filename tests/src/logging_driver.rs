use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};
use tablet_core::{
    async_trait,
    driver::{Connection, Driver, Operation, Response, Rows},
    Result,
};

/// Wraps a driver and records every operation its connections execute.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Shared with every connection opened by this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops_log: self.ops_log_handle(),
        }))
    }

    fn max_connections(&self) -> Option<usize> {
        self.inner.max_connections()
    }
}

/// One executed operation and what came back.
#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,

    /// The response rows, or the error message if the operation failed
    pub response: std::result::Result<Rows, String>,
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, operation: Operation) -> Result<Response> {
        let operation_clone = operation.clone();

        let res = self.inner.exec(operation).await;

        let response = match &res {
            Ok(response) => Ok(response.rows.clone()),
            Err(err) => Err(err.to_string()),
        };

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation: operation_clone,
                response,
            });

        res
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.inner.close().await
    }
}
