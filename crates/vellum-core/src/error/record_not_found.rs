use super::Error;

/// Error when a document, locale or status targeted by an operation does not
/// exist.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    context: Option<Box<str>>,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("record not found")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a record not found error, describing what was looked up.
    pub fn record_not_found(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::RecordNotFound(_))
    }
}
