use super::Error;

/// Error when the database or its catalog cannot be reached, or a query
/// could not be executed at all.
///
/// Connection errors are fatal for the current operation and are never
/// retried.
#[derive(Debug)]
pub(super) struct ConnectionError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connection error: ")?;
        super::write_sources(f, self.inner.as_ref())
    }
}

impl Error {
    /// Creates a connection error wrapping the driver's error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Connection(ConnectionError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Connection(_))
    }
}
