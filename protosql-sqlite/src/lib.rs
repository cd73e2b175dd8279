//! protosql-sqlite: SQLite extension for querying protobuf-encoded values.
//!
//! Registers two scalar functions and one table-valued function on a
//! connection, all backed by a shared [`DescriptorRegistry`].
//!
//! ## Usage
//!
//! ```sql
//! -- Schema loading requires SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION
//! SELECT protobuf_load('addressbook.pb');
//!
//! SELECT protobuf_extract(data, 'Person', '$.phones[0].number') FROM people;
//!
//! SELECT number, name FROM protobuf_enum('Person.PhoneType');
//! ```
//!
//! From Rust, register against an isolated registry:
//!
//! ```rust
//! use std::sync::Arc;
//! use protosql_core::DescriptorRegistry;
//!
//! let conn = rusqlite::Connection::open_in_memory().unwrap();
//! protosql_sqlite::register(&conn, Arc::new(DescriptorRegistry::new())).unwrap();
//!
//! let value: Option<i64> = conn
//!     .query_row("SELECT protobuf_extract(NULL, 'Person', '$')", [], |row| row.get(0))
//!     .unwrap();
//! assert_eq!(value, None);
//! ```
//!
//! Built with `--no-default-features --features loadable_extension`, the
//! crate's cdylib exports `sqlite3_protosql_init` for `load_extension()`.

mod error;
mod gate;
mod udf;
mod vtab;

use std::sync::Arc;

use protosql_core::DescriptorRegistry;
use rusqlite::Connection;

pub use error::ExtensionError;
pub use gate::{extension_loading_enabled, set_extension_loading, ConnectionLoadGate};
pub use protosql_core;
pub use vtab::{EnumCursor, EnumTable};

/// Extension name.
pub const EXTENSION_NAME: &str = "protosql";

/// Extension version.
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oldest SQLite release providing everything the extension uses.
pub const MIN_SQLITE_VERSION: i32 = 3_013_000;

/// Register `protobuf_load`, `protobuf_extract` and `protobuf_enum`.
pub fn register(conn: &Connection, registry: Arc<DescriptorRegistry>) -> rusqlite::Result<()> {
    udf::register_all(conn, &registry)?;
    vtab::register_all(conn, registry)?;

    tracing::debug!("Registered {} v{} functions", EXTENSION_NAME, EXTENSION_VERSION);
    Ok(())
}

/// Get extension metadata.
pub fn extension_info() -> (&'static str, &'static str) {
    (EXTENSION_NAME, EXTENSION_VERSION)
}

/// Extension entry point called by SQLite's `load_extension()`.
///
/// # Safety
///
/// Must only be called by SQLite with valid `db`, `pz_err_msg` and `p_api`
/// pointers.
#[cfg(feature = "loadable_extension")]
#[no_mangle]
pub unsafe extern "C" fn sqlite3_protosql_init(
    db: *mut rusqlite::ffi::sqlite3,
    pz_err_msg: *mut *mut std::os::raw::c_char,
    p_api: *mut rusqlite::ffi::sqlite3_api_routines,
) -> std::os::raw::c_int {
    Connection::extension_init2(db, pz_err_msg, p_api, extension_init)
}

#[cfg(feature = "loadable_extension")]
fn extension_init(db: Connection) -> rusqlite::Result<bool> {
    if rusqlite::version_number() < MIN_SQLITE_VERSION {
        return Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some(format!(
                "{} requires SQLite 3.13.0 or later, found {}",
                EXTENSION_NAME,
                rusqlite::version()
            )),
        ));
    }

    tracing::info!("Loading {} v{} extension", EXTENSION_NAME, EXTENSION_VERSION);
    register(&db, DescriptorRegistry::global())?;

    // Not persistent: registered per connection
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_info() {
        let (name, version) = extension_info();
        assert_eq!(name, "protosql");
        assert!(!version.is_empty());
    }

    #[test]
    fn test_linked_sqlite_is_new_enough() {
        assert!(rusqlite::version_number() >= MIN_SQLITE_VERSION);
    }
}
