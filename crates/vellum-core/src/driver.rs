mod catalog;
pub use catalog::{Catalog, RawColumn, RawIndex, RawReference};

mod operation;
pub use operation::{Operation, TransactionOp};

mod response;
pub use response::{Response, Rows};

mod transaction;
pub use transaction::{IsolationLevel, TransactionManager};

use crate::{async_trait, Error, Result};

use std::fmt::Debug;

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Opens a new connection. Pools call this to fill themselves.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Catalog of the given database schema, used by the schema inspector.
    async fn catalog(&self, schema: &str) -> Result<Box<dyn Catalog>> {
        Err(Error::unsupported_feature(format!(
            "driver does not expose a catalog; schema={schema}"
        )))
    }

    /// Maximum number of connections the driver can usefully serve.
    /// `None` leaves the pool's default.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
