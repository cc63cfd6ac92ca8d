use crate::logging_driver::DriverOp;
use std::sync::{Arc, Mutex};

/// A view over the operations recorded by [`LoggingDriver`](crate::LoggingDriver).
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Forget everything logged so far, such as the table setup.
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the oldest operation.
    #[track_caller]
    pub fn pop(&mut self) -> DriverOp {
        let mut ops = self.ops.lock().unwrap();
        assert!(!ops.is_empty(), "no operations logged");
        ops.remove(0)
    }

    /// The SQL text of every logged operation, in order. Transaction control
    /// shows up as `start`, `commit`, or `rollback`.
    pub fn statements(&self) -> Vec<String> {
        use tablet_core::driver::{operation::Transaction, Operation};

        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| match &op.operation {
                Operation::Transaction(Transaction::Start) => "start".to_string(),
                Operation::Transaction(Transaction::Commit) => "commit".to_string(),
                Operation::Transaction(Transaction::Rollback) => "rollback".to_string(),
                op => op.sql().unwrap_or_default().to_string(),
            })
            .collect()
    }
}
