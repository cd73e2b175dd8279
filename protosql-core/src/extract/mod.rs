//! Extraction engine.
//!
//! Decodes an encoded message against a registered type and walks a
//! [`Path`] through it, producing one SQL-compatible value.
//!
//! | Reached value | Result |
//! |---------------|--------|
//! | message (including `$`) | `Blob` of the re-encoded message |
//! | `float`, `double` | `Real` |
//! | integer kinds, `bool` | `Integer` (`true` = 1) |
//! | `uint64` above `i64::MAX` | `Integer`, wrapped two's-complement |
//! | `string` | `Text` |
//! | `bytes` | `Blob` |
//! | enum | `Integer` number; `.name` / `.number` accessors |
//! | unset singular message, any suffix | `Null` |
//! | repeated field without index | error |

mod node;

use std::borrow::Cow;

use prost::Message;
use prost_reflect::{DynamicMessage, EnumDescriptor, ReflectMessage, Value};
use tracing::warn;

use crate::error::ExtractError;
use crate::path::{parse_path, EnumAccessor, Path, Step};
use crate::registry::DescriptorRegistry;

use node::Node;

/// A value ready to hand to a SQL engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Extracted {
    pub fn is_null(&self) -> bool {
        matches!(self, Extracted::Null)
    }
}

/// Evaluates paths against encoded messages.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'r> {
    registry: &'r DescriptorRegistry,
    warn_on_unsigned: bool,
}

impl<'r> Extractor<'r> {
    /// Extractor using the registry's own configuration.
    pub fn new(registry: &'r DescriptorRegistry) -> Self {
        Self {
            registry,
            warn_on_unsigned: registry.config().warn_on_unsigned,
        }
    }

    /// Override whether wrapped `uint64` values are logged.
    pub fn warn_on_unsigned(mut self, enabled: bool) -> Self {
        self.warn_on_unsigned = enabled;
        self
    }

    /// Parse `path` and extract.
    ///
    /// The path is parsed before anything else, so malformed path text is
    /// reported even when the type is unknown or the bytes are corrupt.
    pub fn extract_str(&self, bytes: &[u8], root_type: &str, path: &str) -> Result<Extracted, ExtractError> {
        let path = parse_path(path)?;
        self.extract(bytes, root_type, &path)
    }

    /// Extract the value at `path` from `bytes` encoded as `root_type`.
    pub fn extract(&self, bytes: &[u8], root_type: &str, path: &Path) -> Result<Extracted, ExtractError> {
        let message_type = self.registry.resolve_message(root_type)?;
        let root = DynamicMessage::decode(message_type.descriptor().clone(), bytes).map_err(|source| {
            ExtractError::CorruptData {
                type_name: root_type.to_string(),
                source,
            }
        })?;

        let mut node = Node::Message(Cow::Borrowed(&root));
        let mut steps = path.steps().iter().peekable();

        while let Some(step) = steps.next() {
            node = match (node, step) {
                (Node::Absent, _) => return Ok(Extracted::Null),

                (Node::Message(message), Step::Field(name)) => Node::field(message, name)?,
                (Node::Message(message), Step::Index(_)) => {
                    return Err(ExtractError::invalid_path(format!(
                        "cannot index into message '{}'",
                        message.descriptor().full_name()
                    )))
                }

                (Node::Repeated { field, items }, Step::Index(i)) => Node::index(field, items, *i)?,
                (Node::Repeated { field, .. }, Step::Field(_)) => {
                    return Err(expected_index(field.name()));
                }

                (Node::Enum { number, descriptor }, Step::Field(name)) if steps.peek().is_none() => {
                    return match EnumAccessor::from_field(name) {
                        Some(EnumAccessor::Number) => Ok(Extracted::Integer(i64::from(number))),
                        Some(EnumAccessor::Name) => first_declared_name(&descriptor, number)
                            .map(|name| Extracted::Text(name.to_string()))
                            .ok_or_else(|| ExtractError::UnknownEnumValue {
                                number,
                                enum_name: descriptor.full_name().to_string(),
                            }),
                        None => Err(ExtractError::past_scalar()),
                    };
                }

                (Node::Enum { .. } | Node::Scalar(_), _) => return Err(ExtractError::past_scalar()),
            };
        }

        match node {
            Node::Absent => Ok(Extracted::Null),
            Node::Message(message) => Ok(Extracted::Blob(message.encode_to_vec())),
            Node::Repeated { field, .. } => Err(expected_index(field.name())),
            Node::Enum { number, .. } => Ok(Extracted::Integer(i64::from(number))),
            Node::Scalar(value) => self.scalar(value.into_owned(), root_type, path),
        }
    }

    fn scalar(&self, value: Value, root_type: &str, path: &Path) -> Result<Extracted, ExtractError> {
        let extracted = match value {
            Value::Bool(b) => Extracted::Integer(i64::from(b)),
            Value::I32(v) => Extracted::Integer(i64::from(v)),
            Value::I64(v) => Extracted::Integer(v),
            Value::U32(v) => Extracted::Integer(i64::from(v)),
            Value::U64(v) => {
                if self.warn_on_unsigned && v > i64::MAX as u64 {
                    warn!(
                        type_name = root_type,
                        path = %path,
                        value = v,
                        "uint64 value exceeds the signed 64-bit range, returning it wrapped"
                    );
                }
                Extracted::Integer(v as i64)
            }
            Value::F32(v) => Extracted::Real(f64::from(v)),
            Value::F64(v) => Extracted::Real(v),
            Value::String(s) => Extracted::Text(s),
            Value::Bytes(b) => Extracted::Blob(b.to_vec()),
            Value::EnumNumber(n) => Extracted::Integer(i64::from(n)),
            Value::Message(m) => Extracted::Blob(m.encode_to_vec()),
            Value::List(_) | Value::Map(_) => {
                return Err(ExtractError::invalid_path(format!(
                    "'{path}' does not address a single value"
                )))
            }
        };
        Ok(extracted)
    }
}

/// Aliases resolve to the earliest declaration.
fn first_declared_name(descriptor: &EnumDescriptor, number: i32) -> Option<&str> {
    descriptor
        .enum_descriptor_proto()
        .value
        .iter()
        .find(|v| v.number() == number)
        .map(|v| v.name())
}

fn expected_index(field: &str) -> ExtractError {
    ExtractError::invalid_path(format!("Expected index into repeated field '{field}'"))
}
