//! Field tree nodes visited while walking a path.

use std::borrow::Cow;

use prost_reflect::{DynamicMessage, EnumDescriptor, FieldDescriptor, Kind, ReflectMessage, Value};

use crate::error::ExtractError;

/// The value reached after zero or more steps.
///
/// Borrows from the decoded root wherever the codec hands out references;
/// defaults for unset fields are owned.
#[derive(Debug)]
pub(crate) enum Node<'a> {
    Message(Cow<'a, DynamicMessage>),

    /// A repeated field awaiting an index
    Repeated {
        field: FieldDescriptor,
        items: Cow<'a, [Value]>,
    },

    Enum {
        number: i32,
        descriptor: EnumDescriptor,
    },

    Scalar(Cow<'a, Value>),

    /// Unset singular message field; the whole result is NULL
    Absent,
}

impl<'a> Node<'a> {
    /// Step into the named field of a message.
    pub(crate) fn field(message: Cow<'a, DynamicMessage>, name: &str) -> Result<Self, ExtractError> {
        let descriptor = message.descriptor();
        let field = descriptor
            .get_field_by_name(name)
            .ok_or_else(|| ExtractError::UnknownField {
                field: name.to_string(),
                message: descriptor.full_name().to_string(),
            })?;

        if field.is_map() {
            return Err(ExtractError::invalid_path(format!(
                "Map fields cannot be traversed ('{name}')"
            )));
        }

        if !field.is_list() && field.kind().as_message().is_some() && !message.has_field(&field) {
            return Ok(Node::Absent);
        }

        let value = match message {
            Cow::Borrowed(m) => m.get_field(&field),
            Cow::Owned(m) => Cow::Owned(m.get_field(&field).into_owned()),
        };

        if field.is_list() {
            let items = match value {
                Cow::Borrowed(Value::List(items)) => Cow::Borrowed(items.as_slice()),
                Cow::Owned(Value::List(items)) => Cow::Owned(items),
                _ => {
                    return Err(ExtractError::invalid_path(format!(
                        "field '{name}' does not hold a list"
                    )))
                }
            };
            return Ok(Node::Repeated { field, items });
        }

        Ok(Self::element(value, &field.kind()))
    }

    /// Select one element of a repeated field. Negative indices count from
    /// the end.
    pub(crate) fn index(field: FieldDescriptor, items: Cow<'a, [Value]>, index: i64) -> Result<Self, ExtractError> {
        let len = items.len();
        let position = normalize_index(index, len).ok_or_else(|| ExtractError::IndexOutOfRange {
            index,
            field: field.name().to_string(),
            len,
        })?;

        let item = match items {
            Cow::Borrowed(items) => Cow::Borrowed(&items[position]),
            Cow::Owned(mut items) => Cow::Owned(items.swap_remove(position)),
        };

        Ok(Self::element(item, &field.kind()))
    }

    /// Classify a single (non-repeated) value by its declared kind.
    fn element(value: Cow<'a, Value>, kind: &Kind) -> Self {
        match (kind, value) {
            (Kind::Message(_), Cow::Borrowed(Value::Message(m))) => Node::Message(Cow::Borrowed(m)),
            (Kind::Message(_), Cow::Owned(Value::Message(m))) => Node::Message(Cow::Owned(m)),
            (Kind::Enum(descriptor), value) => match value.as_enum_number() {
                Some(number) => Node::Enum {
                    number,
                    descriptor: descriptor.clone(),
                },
                None => Node::Scalar(value),
            },
            (_, value) => Node::Scalar(value),
        }
    }
}

/// Map a possibly negative index onto `[0, len)`.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let absolute = if index < 0 { index.checked_add(len)? } else { index };
    if (0..len).contains(&absolute) {
        usize::try_from(absolute).ok()
    } else {
        None
    }
}
