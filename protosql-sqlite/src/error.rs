//! SQLite-specific error types.

use protosql_core::{ErrorKind, ExtractError, PathError, RegistryError};
use thiserror::Error;

/// Errors raised by the extension's SQL functions.
///
/// Core errors pass through with their message unchanged so that SQL callers
/// see exactly the text the core produces.
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error(transparent)]
    Core(#[from] protosql_core::Error),

    #[error("{function}: {message}")]
    InvalidArgument {
        function: &'static str,
        message: String,
    },
}

impl ExtensionError {
    pub fn invalid_argument(function: &'static str, message: impl Into<String>) -> Self {
        ExtensionError::InvalidArgument {
            function,
            message: message.into(),
        }
    }

    /// Classification of core errors; `None` for argument errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ExtensionError::Core(e) => Some(e.kind()),
            ExtensionError::InvalidArgument { .. } => None,
        }
    }
}

impl From<RegistryError> for ExtensionError {
    fn from(err: RegistryError) -> Self {
        ExtensionError::Core(err.into())
    }
}

impl From<PathError> for ExtensionError {
    fn from(err: PathError) -> Self {
        ExtensionError::Core(err.into())
    }
}

impl From<ExtractError> for ExtensionError {
    fn from(err: ExtractError) -> Self {
        ExtensionError::Core(err.into())
    }
}

impl From<ExtensionError> for rusqlite::Error {
    fn from(err: ExtensionError) -> Self {
        rusqlite::Error::UserFunctionError(Box::new(err))
    }
}
