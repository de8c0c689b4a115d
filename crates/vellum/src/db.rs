mod builder;
pub use builder::{Builder, Config};

mod connect;
pub use connect::Connect;

mod pool;
pub use pool::{Pool, PoolConfig, PoolConnection, Timeouts};

mod transaction;
pub use transaction::Transaction;

use crate::{Documents, Result, SchemaInspector};

use std::sync::Arc;
use tokio::sync::Mutex;
use vellum_core::{
    driver::{Driver, Operation, Response},
    schema::app::Registry,
    stmt::{self, Row, Statement},
};

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) registry: Registry,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) pool: Pool,
    pub(crate) config: Config,
}

#[derive(Debug, Clone)]
pub(crate) enum ConnectionType {
    /// Each statement checks out a pooled connection
    Pool,

    /// All statements run on the connection holding the open transaction
    Transaction(Arc<Mutex<PoolConnection>>),
}

/// A database handle. Cheap to clone; clones share the pool and registry.
#[derive(Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,
    pub(crate) connection: ConnectionType,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Document service for the content type `uid`.
    pub fn documents(&self, uid: &str) -> Result<Documents<'_>> {
        let content_type = self.shared.registry.content_type(uid)?;
        Ok(Documents::new(self, content_type))
    }

    /// Inspector over the driver's catalog for the configured schema.
    pub async fn schema_inspector(&self) -> Result<SchemaInspector> {
        let catalog = self.shared.driver.catalog(&self.shared.config.schema).await?;
        Ok(SchemaInspector::from_catalog(catalog))
    }

    /// Execute a statement
    pub async fn exec(&self, stmt: impl Into<Statement>) -> Result<Response> {
        let op = Operation::from(stmt.into());

        match &self.connection {
            ConnectionType::Pool => {
                let mut connection = self.shared.pool.get().await?;
                connection.exec(op).await
            }
            ConnectionType::Transaction(connection) => connection.lock().await.exec(op).await,
        }
    }

    /// Execute a query, returning all matching rows
    pub async fn query(&self, select: stmt::Select) -> Result<Vec<Row>> {
        self.exec(select).await?.into_values()
    }

    /// Creates the tables of every registered content type and component.
    /// Existing tables are left alone.
    pub async fn push_schema(&self) -> Result<()> {
        let schema = self.shared.registry.db_schema();

        for table in schema.tables {
            tracing::debug!(table = %table.name, "creating table");
            self.exec(stmt::CreateTable {
                table,
                identity: Some(vellum_core::schema::app::columns::ID.to_string()),
                if_not_exists: true,
            })
            .await?;
        }

        Ok(())
    }

    /// Drops and recreates every registered table.
    pub async fn reset_schema(&self) -> Result<()> {
        let schema = self.shared.registry.db_schema();

        // Join tables reference their owners and come right after them.
        for table in schema.tables.iter().rev() {
            self.exec(stmt::DropTable::if_exists(&table.name)).await?;
        }

        self.push_schema().await
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field(
                "in_transaction",
                &matches!(self.connection, ConnectionType::Transaction(_)),
            )
            .finish()
    }
}
