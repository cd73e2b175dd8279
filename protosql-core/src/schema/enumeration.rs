//! Enum type definitions.

use std::collections::HashMap;

/// A single `(number, name)` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub number: i32,
    pub name: String,
}

impl EnumValue {
    pub fn new(number: i32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }
}

/// An enum type loaded from a schema bundle.
///
/// Declarations are kept in schema order, including aliases (several names
/// sharing one number). Two lookup indexes are built once at construction:
/// number to declaration positions, and name to declaration position.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    values: Vec<EnumValue>,
    by_number: HashMap<i32, Vec<usize>>,
    by_name: HashMap<String, usize>,
}

impl EnumType {
    /// Create an enum type from declarations in schema order.
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        let mut by_number: HashMap<i32, Vec<usize>> = HashMap::new();
        let mut by_name = HashMap::with_capacity(values.len());
        for (idx, value) in values.iter().enumerate() {
            by_number.entry(value.number).or_default().push(idx);
            by_name.entry(value.name.clone()).or_insert(idx);
        }

        Self {
            name: name.into(),
            values,
            by_number,
            by_name,
        }
    }

    /// Build from a codec descriptor.
    ///
    /// Reads the raw descriptor proto: the codec's own value list is sorted
    /// by number and loses declaration order.
    pub fn from_descriptor(descriptor: &prost_reflect::EnumDescriptor) -> Self {
        let values = descriptor
            .enum_descriptor_proto()
            .value
            .iter()
            .map(|v| EnumValue::new(v.number(), v.name()))
            .collect();
        Self::new(descriptor.full_name(), values)
    }

    /// Fully-qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declarations in schema order.
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Every declaration with this number, in schema order.
    pub fn values_for_number(&self, number: i32) -> impl Iterator<Item = &EnumValue> + '_ {
        self.by_number
            .get(&number)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.values[idx])
    }

    /// The declaration with this name.
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.by_name.get(name).map(|&idx| &self.values[idx])
    }

    /// First declared name for a number (aliases resolve to the earliest).
    pub fn first_name_for(&self, number: i32) -> Option<&str> {
        self.values_for_number(number).next().map(|v| v.name.as_str())
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

impl Eq for EnumType {}
