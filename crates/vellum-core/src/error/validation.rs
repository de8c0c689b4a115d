use super::Error;

/// Error when input fails validation or an operation is not permitted on its
/// target. Reported to the caller; the operation has no effect.
#[derive(Debug)]
pub(super) struct ValidationError {
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates a validation error. The message is displayed as-is.
    pub fn validation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Validation(_))
    }
}
