//! Enum lister.
//!
//! Lists the `(number, name)` declarations of a registered enum type, in
//! declaration order with aliases included. Backs the `protobuf_enum`
//! table-valued function.

use crate::error::RegistryError;
use crate::registry::DescriptorRegistry;
use crate::schema::EnumValue;

/// Which declarations to return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnumFilter {
    #[default]
    All,

    /// Every name declared for this number
    Number(i32),

    /// The declaration with this name
    Name(String),
}

/// List declarations of the named enum type.
pub fn list_enum_values(
    registry: &DescriptorRegistry,
    enum_name: &str,
    filter: &EnumFilter,
) -> Result<Vec<EnumValue>, RegistryError> {
    let enum_type = registry.resolve_enum(enum_name)?;

    let values = match filter {
        EnumFilter::All => enum_type.values().to_vec(),
        EnumFilter::Number(number) => enum_type.values_for_number(*number).cloned().collect(),
        EnumFilter::Name(name) => enum_type.value_by_name(name).cloned().into_iter().collect(),
    };

    Ok(values)
}
