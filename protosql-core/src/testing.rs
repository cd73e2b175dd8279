//! Test utilities for building schema bundles and encoded messages.
//!
//! Provides builders over the `google.protobuf` descriptor structs so tests
//! can assemble a `FileDescriptorSet` in-process (no `protoc` needed), plus
//! the fixture schemas used across the workspace test suites.

use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, Value};
use prost_types::field_descriptor_proto::Label;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumOptions, EnumValueDescriptorProto,
    FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet, MessageOptions,
};

pub use prost_types::field_descriptor_proto::Type as FieldType;

/// Builder for a `.proto` file descriptor (proto2 syntax).
#[derive(Debug, Clone)]
pub struct FileBuilder {
    file: FileDescriptorProto,
}

impl FileBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            file: FileDescriptorProto {
                name: Some(name.to_string()),
                syntax: Some("proto2".to_string()),
                ..Default::default()
            },
        }
    }

    pub fn package(mut self, package: &str) -> Self {
        self.file.package = Some(package.to_string());
        self
    }

    pub fn message(mut self, message: MessageBuilder) -> Self {
        self.file.message_type.push(message.build());
        self
    }

    pub fn enumeration(mut self, enumeration: EnumBuilder) -> Self {
        self.file.enum_type.push(enumeration.build());
        self
    }

    pub fn build(self) -> FileDescriptorProto {
        self.file
    }
}

/// Builder for a message descriptor.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    proto: DescriptorProto,
}

impl MessageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            proto: DescriptorProto {
                name: Some(name.to_string()),
                ..Default::default()
            },
        }
    }

    fn field(mut self, name: &str, number: i32, label: Label, ty: FieldType, type_name: Option<&str>) -> Self {
        self.proto.field.push(FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            label: Some(label as i32),
            r#type: Some(ty as i32),
            type_name: type_name.map(|t| t.to_string()),
            ..Default::default()
        });
        self
    }

    /// `optional <scalar> name = number;`
    pub fn optional(self, name: &str, number: i32, ty: FieldType) -> Self {
        self.field(name, number, Label::Optional, ty, None)
    }

    /// `repeated <scalar> name = number;`
    pub fn repeated(self, name: &str, number: i32, ty: FieldType) -> Self {
        self.field(name, number, Label::Repeated, ty, None)
    }

    /// `optional <Message|Enum> name = number;` with a `.`-qualified type name.
    pub fn optional_ref(self, name: &str, number: i32, ty: FieldType, type_name: &str) -> Self {
        self.field(name, number, Label::Optional, ty, Some(type_name))
    }

    /// `repeated <Message|Enum> name = number;` with a `.`-qualified type name.
    pub fn repeated_ref(self, name: &str, number: i32, ty: FieldType, type_name: &str) -> Self {
        self.field(name, number, Label::Repeated, ty, Some(type_name))
    }

    /// `map<key, value> name = number;` with a synthetic entry message.
    ///
    /// `scope` is the fully-qualified name of this message (with leading dot).
    pub fn map(mut self, name: &str, number: i32, scope: &str, key: FieldType, value: FieldType) -> Self {
        let entry_name = format!("{}Entry", upper_camel(name));
        let mut entry = MessageBuilder::new(&entry_name)
            .optional("key", 1, key)
            .optional("value", 2, value)
            .build();
        entry.options = Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        });
        self.proto.nested_type.push(entry);
        let type_name = format!("{scope}.{entry_name}");
        self.field(name, number, Label::Repeated, FieldType::Message, Some(&type_name))
    }

    pub fn nested(mut self, message: MessageBuilder) -> Self {
        self.proto.nested_type.push(message.build());
        self
    }

    pub fn nested_enum(mut self, enumeration: EnumBuilder) -> Self {
        self.proto.enum_type.push(enumeration.build());
        self
    }

    pub fn build(self) -> DescriptorProto {
        self.proto
    }
}

/// Builder for an enum descriptor.
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    proto: EnumDescriptorProto,
}

impl EnumBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            proto: EnumDescriptorProto {
                name: Some(name.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn value(mut self, name: &str, number: i32) -> Self {
        self.proto.value.push(EnumValueDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            ..Default::default()
        });
        self
    }

    /// `option allow_alias = true;`
    pub fn allow_alias(mut self) -> Self {
        self.proto.options = Some(EnumOptions {
            allow_alias: Some(true),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> EnumDescriptorProto {
        self.proto
    }
}

fn upper_camel(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Serialize files into a schema bundle (`FileDescriptorSet` bytes).
pub fn bundle(files: impl IntoIterator<Item = FileDescriptorProto>) -> Vec<u8> {
    FileDescriptorSet {
        file: files.into_iter().collect(),
    }
    .encode_to_vec()
}

/// Decode a bundle into a codec pool for building test messages.
pub fn pool_from_bundle(bundle: &[u8]) -> DescriptorPool {
    DescriptorPool::decode(bundle).expect("fixture bundle should decode")
}

/// An empty message of the named type.
pub fn new_message(pool: &DescriptorPool, name: &str) -> DynamicMessage {
    let descriptor = pool
        .get_message_by_name(name)
        .unwrap_or_else(|| panic!("fixture type {name} missing"));
    DynamicMessage::new(descriptor)
}

/// Encode a message to wire bytes.
pub fn encode(message: &DynamicMessage) -> Vec<u8> {
    message.encode_to_vec()
}

// =============================================================================
// Fixture schemas
// =============================================================================

/// ```text
/// message Person {
///   enum PhoneType { MOBILE = 0; HOME = 1; WORK = 2; }
///   message PhoneNumber {
///     optional string number = 1;
///     optional PhoneType type = 2 [default = HOME];
///   }
///   optional string name = 1;
///   optional int32 id = 2;
///   optional string email = 3;
///   repeated PhoneNumber phones = 4;
///   optional Person manager = 5;
///   repeated int32 scores = 6;
///   optional double salary = 7;
///   optional bool active = 8;
/// }
/// ```
pub fn address_book_file() -> FileDescriptorProto {
    let mut phone_number = MessageBuilder::new("PhoneNumber")
        .optional("number", 1, FieldType::String)
        .optional_ref("type", 2, FieldType::Enum, ".Person.PhoneType")
        .build();
    phone_number.field[1].default_value = Some("HOME".to_string());

    let mut person = MessageBuilder::new("Person")
        .nested_enum(
            EnumBuilder::new("PhoneType")
                .value("MOBILE", 0)
                .value("HOME", 1)
                .value("WORK", 2),
        )
        .optional("name", 1, FieldType::String)
        .optional("id", 2, FieldType::Int32)
        .optional("email", 3, FieldType::String)
        .repeated_ref("phones", 4, FieldType::Message, ".Person.PhoneNumber")
        .optional_ref("manager", 5, FieldType::Message, ".Person")
        .repeated("scores", 6, FieldType::Int32)
        .optional("salary", 7, FieldType::Double)
        .optional("active", 8, FieldType::Bool)
        .build();
    person.nested_type.push(phone_number);

    FileDescriptorProto {
        message_type: vec![person],
        ..FileBuilder::new("addressbook.proto").build()
    }
}

pub fn address_book_bundle() -> Vec<u8> {
    bundle([address_book_file()])
}

/// A `Person` with a name, id, two phones, scores and `active = true`.
///
/// `email`, `manager` and `salary` are left unset.
pub fn sample_person(pool: &DescriptorPool) -> DynamicMessage {
    let phone = |number: &str, kind: i32| {
        let mut phone = new_message(pool, "Person.PhoneNumber");
        phone.set_field_by_name("number", Value::String(number.to_string()));
        phone.set_field_by_name("type", Value::EnumNumber(kind));
        Value::Message(phone)
    };

    let mut person = new_message(pool, "Person");
    person.set_field_by_name("name", Value::String("John Smith".to_string()));
    person.set_field_by_name("id", Value::I32(42));
    person.set_field_by_name(
        "phones",
        Value::List(vec![phone("555-0100", 0), phone("555-0199", 2)]),
    );
    person.set_field_by_name(
        "scores",
        Value::List(vec![Value::I32(7), Value::I32(8), Value::I32(9)]),
    );
    person.set_field_by_name("active", Value::Bool(true));
    person
}

/// ```text
/// enum TestEnum { A = 3; B = 2; C = 1; }
/// enum TestEnumWithAliases { option allow_alias = true; A1 = 1; XY = 2; A2 = 1; }
/// message TestMessage {
///   enum EmbeddedTestEnum { D = 1; E = 2; F = 3; }
///   optional EmbeddedTestEnum enum_field = 1;
///   optional TestEnumWithAliases aliased = 2;
/// }
/// ```
pub fn enum_file() -> FileDescriptorProto {
    FileBuilder::new("enums.proto")
        .enumeration(EnumBuilder::new("TestEnum").value("A", 3).value("B", 2).value("C", 1))
        .enumeration(
            EnumBuilder::new("TestEnumWithAliases")
                .allow_alias()
                .value("A1", 1)
                .value("XY", 2)
                .value("A2", 1),
        )
        .message(
            MessageBuilder::new("TestMessage")
                .nested_enum(
                    EnumBuilder::new("EmbeddedTestEnum")
                        .value("D", 1)
                        .value("E", 2)
                        .value("F", 3),
                )
                .optional_ref("enum_field", 1, FieldType::Enum, ".TestMessage.EmbeddedTestEnum")
                .optional_ref("aliased", 2, FieldType::Enum, ".TestEnumWithAliases"),
        )
        .build()
}

pub fn enum_bundle() -> Vec<u8> {
    bundle([enum_file()])
}

/// `message M { repeated int32 x = 1; }`
pub fn repeated_file() -> FileDescriptorProto {
    FileBuilder::new("repeated.proto")
        .message(MessageBuilder::new("M").repeated("x", 1, FieldType::Int32))
        .build()
}

pub fn repeated_bundle() -> Vec<u8> {
    bundle([repeated_file()])
}

/// An `M` whose `x` holds `10..110` (100 elements).
pub fn hundred_element_m(pool: &DescriptorPool) -> DynamicMessage {
    let mut m = new_message(pool, "M");
    m.set_field_by_name("x", Value::List((10..110).map(Value::I32).collect()));
    m
}

/// One optional field per protobuf scalar type, plus a map field.
pub fn scalars_file() -> FileDescriptorProto {
    FileBuilder::new("scalars.proto")
        .package("test")
        .message(
            MessageBuilder::new("Scalars")
                .optional("d", 1, FieldType::Double)
                .optional("f", 2, FieldType::Float)
                .optional("i32", 3, FieldType::Int32)
                .optional("i64", 4, FieldType::Int64)
                .optional("u32", 5, FieldType::Uint32)
                .optional("u64", 6, FieldType::Uint64)
                .optional("s32", 7, FieldType::Sint32)
                .optional("s64", 8, FieldType::Sint64)
                .optional("fx32", 9, FieldType::Fixed32)
                .optional("fx64", 10, FieldType::Fixed64)
                .optional("sfx32", 11, FieldType::Sfixed32)
                .optional("sfx64", 12, FieldType::Sfixed64)
                .optional("b", 13, FieldType::Bool)
                .optional("s", 14, FieldType::String)
                .optional("raw", 15, FieldType::Bytes)
                .map("tags", 16, ".test.Scalars", FieldType::String, FieldType::Int32),
        )
        .build()
}

pub fn scalars_bundle() -> Vec<u8> {
    bundle([scalars_file()])
}

/// A `Person` with a different field set, for conflict tests.
pub fn conflicting_person_bundle() -> Vec<u8> {
    bundle([FileBuilder::new("other_person.proto")
        .message(
            MessageBuilder::new("Person")
                .optional("name", 1, FieldType::String)
                .optional("nickname", 2, FieldType::String),
        )
        .build()])
}
