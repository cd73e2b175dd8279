//! Error types for protosql-core.
//!
//! - [`enum@Error`] - Top-level error wrapping everything below
//! - [`RegistryError`] - Loading bundles and resolving type names
//! - [`PathError`] - Malformed path text (re-exported from [`crate::path`])
//! - [`ExtractError`] - Evaluating a path against an encoded message
//!
//! Every variant maps to a stable [`ErrorKind`]. Display text is the message
//! surfaced to SQL callers, so it is kept exact.

use thiserror::Error;

use crate::schema::TypeKind;

pub use crate::path::PathError;

/// Main error type for protosql-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Registry(e) => e.kind(),
            Error::Path(_) => ErrorKind::InvalidPath,
            Error::Extract(e) => e.kind(),
        }
    }
}

/// Errors from the descriptor registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The host has schema loading switched off
    #[error("Extension loading is disabled")]
    LoadDenied,

    /// The host could not report its load setting
    #[error("Failed to get load_extension setting: {reason}")]
    PermissionUnavailable { reason: String },

    /// Bundle file missing or unreadable
    #[error("Could not load library '{path}': {source}")]
    BundleUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bytes are not a valid descriptor set
    #[error("Invalid schema bundle: {reason}")]
    InvalidBundle { reason: String },

    #[error("Schema conflict: type '{name}' is already loaded with a different definition")]
    SchemaConflict { name: String },

    #[error("Could not find {kind} '{name}'")]
    UnknownType { kind: TypeKind, name: String },
}

impl RegistryError {
    pub fn unknown_message(name: impl Into<String>) -> Self {
        RegistryError::UnknownType {
            kind: TypeKind::Message,
            name: name.into(),
        }
    }

    pub fn unknown_enum(name: impl Into<String>) -> Self {
        RegistryError::UnknownType {
            kind: TypeKind::Enum,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::LoadDenied => ErrorKind::LoadDenied,
            RegistryError::PermissionUnavailable { .. } => ErrorKind::PermissionUnavailable,
            RegistryError::BundleUnreadable { .. } => ErrorKind::BundleUnreadable,
            RegistryError::InvalidBundle { .. } => ErrorKind::InvalidBundle,
            RegistryError::SchemaConflict { .. } => ErrorKind::SchemaConflict,
            RegistryError::UnknownType { .. } => ErrorKind::UnknownType,
        }
    }
}

/// Errors from evaluating a path.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Path(#[from] PathError),

    /// Path is well-formed but does not fit the message structure
    #[error("Invalid path: {detail}")]
    InvalidPath { detail: String },

    #[error("Invalid field name '{field}' for message '{message}'")]
    UnknownField { field: String, message: String },

    #[error("Index {index} out of range for repeated field '{field}' of length {len}")]
    IndexOutOfRange { index: i64, field: String, len: usize },

    #[error("No name declared for value {number} of enum '{enum_name}'")]
    UnknownEnumValue { number: i32, enum_name: String },

    #[error("Failed to parse message '{type_name}': {source}")]
    CorruptData {
        type_name: String,
        #[source]
        source: prost::DecodeError,
    },
}

impl ExtractError {
    pub fn invalid_path(detail: impl Into<String>) -> Self {
        ExtractError::InvalidPath {
            detail: detail.into(),
        }
    }

    /// The one error produced for any step applied to a leaf value.
    pub fn past_scalar() -> Self {
        Self::invalid_path("cannot traverse past a scalar value")
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::Registry(e) => e.kind(),
            ExtractError::Path(_) | ExtractError::InvalidPath { .. } => ErrorKind::InvalidPath,
            ExtractError::UnknownField { .. } => ErrorKind::UnknownField,
            ExtractError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            ExtractError::UnknownEnumValue { .. } => ErrorKind::UnknownEnumValue,
            ExtractError::CorruptData { .. } => ErrorKind::CorruptData,
        }
    }
}

/// Stable classification of every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LoadDenied,
    PermissionUnavailable,
    BundleUnreadable,
    InvalidBundle,
    SchemaConflict,
    UnknownType,
    InvalidPath,
    UnknownField,
    IndexOutOfRange,
    UnknownEnumValue,
    CorruptData,
}
