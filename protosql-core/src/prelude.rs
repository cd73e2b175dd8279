//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```rust
//! use protosql_core::prelude::*;
//!
//! let registry = DescriptorRegistry::new();
//! let err = Extractor::new(&registry).extract_str(&[], "Person", "$").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownType);
//! ```

// Registry
pub use crate::registry::{AllowLoad, DenyLoad, DescriptorRegistry, LoadPermission, LoadReport};

// Paths and extraction
pub use crate::extract::{Extracted, Extractor};
pub use crate::path::{Path, Step};

// Enums
pub use crate::enums::{list_enum_values, EnumFilter};
pub use crate::schema::EnumValue;

pub use crate::config::Config;
pub use crate::error::{Error, ErrorKind, ExtractError, RegistryError};
