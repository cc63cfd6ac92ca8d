mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::{borrow::Cow, fmt::Debug};

/// Opens connections to one database.
///
/// The pool holds a single `Driver` and asks it for a fresh [`Connection`]
/// whenever it needs to grow.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The URL this driver connects to, for logging.
    fn url(&self) -> Cow<'_, str>;

    /// Open a new connection.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;

    /// Upper bound on simultaneous connections the backend supports, if any.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> crate::Result<Response>;

    /// Close the connection. Dropping a connection also closes it, but
    /// without waiting for the server to acknowledge.
    async fn close(self: Box<Self>) -> crate::Result<()> {
        Ok(())
    }
}
