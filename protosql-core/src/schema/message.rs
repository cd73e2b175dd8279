//! Message type definitions.

use super::{Cardinality, ValueKind};

/// One field of a message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared in the schema
    pub name: String,

    /// Field number (wire tag)
    pub number: u32,

    pub cardinality: Cardinality,

    pub kind: ValueKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, number: u32, cardinality: Cardinality, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            number,
            cardinality,
            kind,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }
}

/// Renders as a `.proto` field declaration, e.g. `repeated int32 x = 1`.
impl std::fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_repeated() && !matches!(self.kind, ValueKind::Map(_)) {
            write!(f, "repeated ")?;
        }
        write!(f, "{} {} = {}", self.kind, self.name, self.number)
    }
}

/// A message type loaded from a schema bundle.
///
/// Holds the flattened field list used for structural comparison, plus the
/// codec descriptor used to decode and re-encode values of this type.
#[derive(Debug, Clone)]
pub struct MessageType {
    name: String,
    fields: Vec<FieldSpec>,
    descriptor: prost_reflect::MessageDescriptor,
}

impl MessageType {
    /// Build from a codec descriptor, keeping declaration order.
    pub fn from_descriptor(descriptor: &prost_reflect::MessageDescriptor) -> Self {
        let fields = descriptor
            .fields()
            .map(|field| {
                FieldSpec::new(
                    field.name(),
                    field.number(),
                    field.cardinality().into(),
                    ValueKind::from_field(&field),
                )
            })
            .collect();

        Self {
            name: descriptor.full_name().to_string(),
            fields,
            descriptor: descriptor.clone(),
        }
    }

    /// Fully-qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Codec descriptor for decoding values of this type.
    pub fn descriptor(&self) -> &prost_reflect::MessageDescriptor {
        &self.descriptor
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for MessageType {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{address_book_bundle, pool_from_bundle};

    #[test]
    fn test_from_descriptor_keeps_declaration_order() {
        let pool = pool_from_bundle(&address_book_bundle());
        let person = MessageType::from_descriptor(&pool.get_message_by_name("Person").unwrap());

        let names: Vec<_> = person.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "id", "email", "phones", "manager", "scores", "salary", "active"]);

        let phones = person.field("phones").unwrap();
        assert!(phones.is_repeated());
        assert_eq!(phones.kind, ValueKind::Message("Person.PhoneNumber".into()));
        assert_eq!(person.field("id").unwrap().number, 2);
        assert!(person.field("missing").is_none());
    }

    #[test]
    fn test_field_display() {
        let pool = pool_from_bundle(&address_book_bundle());
        let person = MessageType::from_descriptor(&pool.get_message_by_name("Person").unwrap());

        assert_eq!(person.field("id").unwrap().to_string(), "int32 id = 2");
        assert_eq!(
            person.field("phones").unwrap().to_string(),
            "repeated Person.PhoneNumber phones = 4"
        );

        let tags = FieldSpec::new("tags", 16, Cardinality::Repeated, ValueKind::Map("M.TagsEntry".into()));
        assert_eq!(tags.to_string(), "map<M.TagsEntry> tags = 16");
    }

    #[test]
    fn test_structural_equality_ignores_descriptor_identity() {
        let a = pool_from_bundle(&address_book_bundle());
        let b = pool_from_bundle(&address_book_bundle());
        let left = MessageType::from_descriptor(&a.get_message_by_name("Person").unwrap());
        let right = MessageType::from_descriptor(&b.get_message_by_name("Person").unwrap());
        assert_eq!(left, right);

        let phone = MessageType::from_descriptor(&a.get_message_by_name("Person.PhoneNumber").unwrap());
        assert_ne!(left, phone);
    }
}
