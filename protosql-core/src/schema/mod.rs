//! Engine-agnostic descriptor model.
//!
//! Descriptors loaded from schema bundles are flattened into these types so
//! the registry can compare definitions structurally and the extractor can
//! reason about cardinality and value kinds without touching the codec.
//!
//! # Example
//!
//! ```rust
//! use protosql_core::schema::{EnumType, EnumValue};
//!
//! let phone_type = EnumType::new(
//!     "PhoneType",
//!     vec![EnumValue::new(0, "MOBILE"), EnumValue::new(1, "HOME")],
//! );
//! assert_eq!(phone_type.first_name_for(1), Some("HOME"));
//! ```

mod enumeration;
mod kind;
mod message;

pub use enumeration::{EnumType, EnumValue};
pub use kind::{Cardinality, ValueKind};
pub use message::{FieldSpec, MessageType};

/// A descriptor held by the registry, keyed by its fully-qualified name.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Message(std::sync::Arc<MessageType>),
    Enum(std::sync::Arc<EnumType>),
}

impl TypeDescriptor {
    /// Fully-qualified dotted name (e.g. `TestMessage.EmbeddedTestEnum`).
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Message(m) => m.name(),
            TypeDescriptor::Enum(e) => e.name(),
        }
    }

    /// Which kind of type this is.
    pub fn type_kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Message(_) => TypeKind::Message,
            TypeDescriptor::Enum(_) => TypeKind::Enum,
        }
    }

    /// Structural equality: same kind and same definition.
    ///
    /// The codec handle is never compared, so identical types compiled into
    /// two different bundles compare equal.
    pub fn same_definition(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Message(a), TypeDescriptor::Message(b)) => a == b,
            (TypeDescriptor::Enum(a), TypeDescriptor::Enum(b)) => a == b,
            _ => false,
        }
    }
}

/// Message or enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Message,
    Enum,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Message => write!(f, "message descriptor"),
            TypeKind::Enum => write!(f, "enum type"),
        }
    }
}
