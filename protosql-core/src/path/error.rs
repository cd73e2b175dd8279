//! Error types for path parsing.

use thiserror::Error;

/// Errors from parsing path text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path does not begin with `$`
    #[error("Invalid path '{path}': must start with '$'")]
    MissingRoot { path: String },

    /// Malformed step or trailing input
    #[error("Invalid path '{path}': unexpected '{rest}' at offset {offset}")]
    Syntax {
        path: String,
        offset: usize,
        rest: String,
    },
}

impl PathError {
    /// Byte offset of the first unparsed character.
    pub fn offset(&self) -> usize {
        match self {
            PathError::MissingRoot { .. } => 0,
            PathError::Syntax { offset, .. } => *offset,
        }
    }
}
