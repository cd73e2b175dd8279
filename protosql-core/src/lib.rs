//! # protosql-core
//!
//! Engine-agnostic core for querying protobuf-encoded values from SQL.
//!
//! This crate has no SQL engine dependency. It provides the pieces a host
//! integration (see `protosql-sqlite`) wires into scalar and table-valued
//! functions:
//!
//! - **Descriptor registry**: loads schema bundles (serialized
//!   `FileDescriptorSet`s) and resolves types by fully-qualified name
//! - **Path parser**: compiles `$.field[index]` paths
//! - **Extraction engine**: walks a path through an encoded message and
//!   returns one SQL-compatible value
//! - **Enum lister**: lists an enum type's declarations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use protosql_core::prelude::*;
//!
//! let registry = DescriptorRegistry::new();
//! let bundle = std::fs::read("addressbook.pb").unwrap();
//! registry.load_bundle(&bundle, &AllowLoad).unwrap();
//!
//! # let encoded_person: Vec<u8> = Vec::new();
//! let name = Extractor::new(&registry)
//!     .extract_str(&encoded_person, "Person", "$.phones[0].type.name")
//!     .unwrap();
//! println!("{name:?}");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        protosql-core                                |
//! +---------------------------------------------------------------------+
//! |  schema/     - MessageType, EnumType, ValueKind                     |
//! |  registry/   - DescriptorRegistry, bundle decoding, load gate       |
//! |  path/       - Path AST and nom parser                              |
//! |  extract/    - Extractor, field tree walk, SQL value mapping        |
//! |  enums       - Enum lister                                          |
//! |  config      - Config from defaults and environment                 |
//! |  error       - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```

pub mod config;
pub mod enums;
pub mod error;
pub mod extract;
pub mod path;
pub mod prelude;
pub mod registry;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::Config;
pub use enums::{list_enum_values, EnumFilter};
pub use error::{Error, ErrorKind, ExtractError, PathError, RegistryError};
pub use extract::{Extracted, Extractor};
pub use path::{parse_path, Path, Step};
pub use registry::{AllowLoad, DenyLoad, DescriptorRegistry, LoadPermission, LoadReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
