//! Field value kinds and cardinality.

use prost_reflect::Kind;

/// Value kind of a message field.
///
/// Mirrors the protobuf scalar types one-to-one so that the SQL mapping can
/// tell signed, unsigned and fixed-width integers apart. Enum and message
/// kinds carry the fully-qualified name of the referenced type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,

    /// Reference to an enum type
    Enum(String),

    /// Reference to a message type
    Message(String),

    /// Map field; carries the synthetic entry message name
    Map(String),
}

impl ValueKind {
    /// Build from a codec field descriptor.
    pub fn from_field(field: &prost_reflect::FieldDescriptor) -> Self {
        match field.kind() {
            Kind::Message(entry) if field.is_map() => ValueKind::Map(entry.full_name().to_string()),
            kind => Self::from_kind(&kind),
        }
    }

    /// Build from a codec kind.
    pub fn from_kind(kind: &Kind) -> Self {
        match kind {
            Kind::Double => ValueKind::Double,
            Kind::Float => ValueKind::Float,
            Kind::Int32 => ValueKind::Int32,
            Kind::Int64 => ValueKind::Int64,
            Kind::Uint32 => ValueKind::Uint32,
            Kind::Uint64 => ValueKind::Uint64,
            Kind::Sint32 => ValueKind::Sint32,
            Kind::Sint64 => ValueKind::Sint64,
            Kind::Fixed32 => ValueKind::Fixed32,
            Kind::Fixed64 => ValueKind::Fixed64,
            Kind::Sfixed32 => ValueKind::Sfixed32,
            Kind::Sfixed64 => ValueKind::Sfixed64,
            Kind::Bool => ValueKind::Bool,
            Kind::String => ValueKind::String,
            Kind::Bytes => ValueKind::Bytes,
            Kind::Enum(e) => ValueKind::Enum(e.full_name().to_string()),
            Kind::Message(m) => ValueKind::Message(m.full_name().to_string()),
        }
    }

    /// Protobuf type keyword for display.
    pub fn type_name(&self) -> &str {
        match self {
            ValueKind::Double => "double",
            ValueKind::Float => "float",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Uint32 => "uint32",
            ValueKind::Uint64 => "uint64",
            ValueKind::Sint32 => "sint32",
            ValueKind::Sint64 => "sint64",
            ValueKind::Fixed32 => "fixed32",
            ValueKind::Fixed64 => "fixed64",
            ValueKind::Sfixed32 => "sfixed32",
            ValueKind::Sfixed64 => "sfixed64",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Enum(name) | ValueKind::Message(name) | ValueKind::Map(name) => name,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Map(entry) => write!(f, "map<{entry}>"),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// Field cardinality.
///
/// Proto2 `required` fields are folded into `Optional`: presence is still
/// tracked, and extraction never validates required-ness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Optional,
    Repeated,
}

impl From<prost_reflect::Cardinality> for Cardinality {
    fn from(cardinality: prost_reflect::Cardinality) -> Self {
        match cardinality {
            prost_reflect::Cardinality::Repeated => Cardinality::Repeated,
            prost_reflect::Cardinality::Optional | prost_reflect::Cardinality::Required => {
                Cardinality::Optional
            }
        }
    }
}
