use super::Error;

/// Error from a connection pool.
#[derive(Debug)]
pub(super) struct ConnectionPoolError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionPoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionPoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connection pool: ")?;
        super::write_sources(f, self.inner.as_ref())
    }
}

impl Error {
    /// Creates an error from a connection pool error (building the pool or
    /// checking a connection out of it).
    pub fn connection_pool(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConnectionPool(ConnectionPoolError {
            inner: Box::new(err),
        }))
    }
}
