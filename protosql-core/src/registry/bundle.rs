//! Schema bundle decoding.
//!
//! A bundle is a serialized `google.protobuf.FileDescriptorSet`, the output of
//! `protoc --include_imports --descriptor_set_out=<file>`. Each bundle is
//! decoded into its own codec pool and flattened into one list of named
//! types.

use std::sync::Arc;

use prost_reflect::DescriptorPool;

use crate::error::RegistryError;
use crate::schema::{EnumType, MessageType, TypeDescriptor};

/// Decode a bundle and flatten every message and enum it declares.
///
/// Nested types are included under their dotted names. Synthetic map-entry
/// messages are skipped since they cannot be addressed by users.
pub fn decode_bundle(bytes: &[u8]) -> Result<Vec<TypeDescriptor>, RegistryError> {
    let pool = DescriptorPool::decode(bytes).map_err(|e| RegistryError::InvalidBundle {
        reason: e.to_string(),
    })?;

    let messages = pool
        .all_messages()
        .filter(|m| !m.is_map_entry())
        .map(|m| TypeDescriptor::Message(Arc::new(MessageType::from_descriptor(&m))));

    let enums = pool
        .all_enums()
        .map(|e| TypeDescriptor::Enum(Arc::new(EnumType::from_descriptor(&e))));

    Ok(messages.chain(enums).collect())
}
