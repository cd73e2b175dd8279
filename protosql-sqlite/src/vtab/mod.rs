//! Table-valued functions.
//!
//! - `protobuf_enum(enum_type)` - Declarations of a loaded enum type
//!
//! ## Example Usage
//!
//! ```sql
//! -- All declarations in schema order, aliases included
//! SELECT number, name FROM protobuf_enum('Person.PhoneType');
//!
//! -- Resolve a number to its names
//! SELECT name FROM protobuf_enum('TestEnumWithAliases') WHERE number = 1;
//! ```

mod enum_table;

use std::sync::Arc;

use protosql_core::DescriptorRegistry;
use rusqlite::vtab::eponymous_only_module;
use rusqlite::Connection;

pub use enum_table::{EnumCursor, EnumTable};

/// Register all table-valued functions.
pub fn register_all(conn: &Connection, registry: Arc<DescriptorRegistry>) -> rusqlite::Result<()> {
    conn.create_module(
        "protobuf_enum",
        eponymous_only_module::<EnumTable>(),
        Some(registry),
    )
}
