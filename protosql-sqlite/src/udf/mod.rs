//! Scalar functions.
//!
//! - `protobuf_load(path)` - Load a schema bundle; returns NULL
//! - `protobuf_extract(data, type, path)` - Extract one value from an encoded message
//!
//! ## Example Usage
//!
//! ```sql
//! SELECT protobuf_load('addressbook.pb');
//!
//! SELECT protobuf_extract(data, 'Person', '$.name') AS name,
//!        protobuf_extract(data, 'Person', '$.phones[-1].type.name') AS last_phone_type
//! FROM people;
//! ```

mod extract;
mod load;

use std::sync::Arc;

use protosql_core::DescriptorRegistry;
use rusqlite::Connection;

/// Register all scalar functions.
pub fn register_all(conn: &Connection, registry: &Arc<DescriptorRegistry>) -> rusqlite::Result<()> {
    load::register(conn, Arc::clone(registry))?;
    extract::register(conn, Arc::clone(registry))?;
    Ok(())
}
