//! Error conversion helpers for I/O performed by collaborators
//!
//! Provides an extension trait for cleaner error handling with context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add an action and its target to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// source.load().with_context("load word list", &source.describe())?;
    /// ```
    fn with_context(self, action: &str, target: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, action: &str, target: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, target),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_io_error_when_adding_context_then_message_names_target() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_context("load word list", "words.txt").unwrap_err();
        assert_eq!(err.to_string(), "operation failed: load word list: words.txt");
        assert!(std::error::Error::source(&err).is_some());
    }
}
