use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

pub use deadpool::managed::Timeouts;
use vellum_core::{
    driver::{Connection, Driver},
    Error,
};

/// Pool sizing and checkout timeouts.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Upper bound on open connections. Capped further by
    /// `Driver::max_connections`.
    pub max_size: usize,

    pub timeouts: Timeouts,
}

impl PoolConfig {
    pub fn new() -> PoolConfig {
        PoolConfig {
            max_size: deadpool::managed::PoolConfig::default().max_size,
            timeouts: Timeouts::default(),
        }
    }

    pub fn max_size(mut self, max_size: usize) -> PoolConfig {
        self.max_size = max_size;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> PoolConfig {
        self.timeouts = timeouts;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> PoolConfig {
        PoolConfig::new()
    }
}

/// Driver connections shared by every clone of a `Db`.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
}

impl Pool {
    /// Opens the pool and checks one connection out, so an unreachable
    /// database fails here instead of on the first statement.
    pub async fn new(driver: Arc<dyn Driver>, config: &PoolConfig) -> crate::Result<Pool> {
        let max_size = driver
            .max_connections()
            .map_or(config.max_size, |limit| config.max_size.min(limit));

        tracing::debug!(max_size, "building connection pool");

        let inner = deadpool::managed::Pool::builder(Manager { driver })
            .runtime(deadpool::Runtime::Tokio1)
            .max_size(max_size)
            .timeouts(config.timeouts)
            .build()
            .map_err(Error::connection_pool)?;

        let pool = Pool { inner };
        pool.get().await?;
        Ok(pool)
    }

    pub async fn get(&self) -> crate::Result<PoolConnection> {
        let object = self.inner.get().await.map_err(Error::connection_pool)?;
        Ok(PoolConnection {
            object: Some(object),
            in_transaction: false,
        })
    }

    pub fn status(&self) -> deadpool::Status {
        self.inner.status()
    }
}

#[derive(Debug)]
struct Manager {
    driver: Arc<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Box<dyn Connection>, Error> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _connection: &mut Box<dyn Connection>,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Error> {
        Ok(())
    }
}

/// A checked-out connection, returned to the pool on drop. A connection
/// dropped while a transaction is open is detached from the pool and closed
/// instead, so the next checkout never inherits the transaction.
#[derive(Debug)]
pub struct PoolConnection {
    /// Only `None` while dropping
    object: Option<deadpool::managed::Object<Manager>>,

    in_transaction: bool,
}

impl PoolConnection {
    pub(crate) fn set_in_transaction(&mut self, in_transaction: bool) {
        self.in_transaction = in_transaction;
    }

    fn object(&self) -> &deadpool::managed::Object<Manager> {
        self.object.as_ref().expect("connection used after drop")
    }

    fn object_mut(&mut self) -> &mut deadpool::managed::Object<Manager> {
        self.object.as_mut().expect("connection used after drop")
    }
}

impl Drop for PoolConnection {
    fn drop(&mut self) {
        let Some(object) = self.object.take() else {
            return;
        };

        if self.in_transaction {
            tracing::warn!("connection dropped with an open transaction; closing it");
            drop(deadpool::managed::Object::take(object));
        }
    }
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Box<dyn Connection> {
        self.object()
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Box<dyn Connection> {
        self.object_mut()
    }
}
