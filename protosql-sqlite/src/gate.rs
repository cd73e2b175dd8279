//! Load-permission gate backed by the connection's extension-loading flag.
//!
//! `protobuf_load` mutates process-wide state, so it is only allowed when
//! the calling connection has `SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION`
//! switched on, the same switch that guards `load_extension()`.

use std::os::raw::c_int;

use protosql_core::{LoadPermission, RegistryError};
use rusqlite::{ffi, Connection};

/// Gate answering from one connection's load-extension setting.
pub struct ConnectionLoadGate<'c> {
    conn: &'c Connection,
}

impl<'c> ConnectionLoadGate<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl LoadPermission for ConnectionLoadGate<'_> {
    fn check(&self) -> Result<(), RegistryError> {
        match extension_loading_enabled(self.conn) {
            Ok(true) => Ok(()),
            Ok(false) => Err(RegistryError::LoadDenied),
            Err(e) => Err(RegistryError::PermissionUnavailable {
                reason: e.to_string(),
            }),
        }
    }
}

/// Read `SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION` without changing it.
pub fn extension_loading_enabled(conn: &Connection) -> rusqlite::Result<bool> {
    let mut enabled: c_int = 0;
    // -1 queries the current value
    let rc = unsafe {
        ffi::sqlite3_db_config(
            conn.handle(),
            ffi::SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION as c_int,
            -1 as c_int,
            &mut enabled as *mut c_int,
        )
    };
    check(rc)?;
    Ok(enabled != 0)
}

/// Turn `SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION` on or off.
///
/// Only the C-level switch is touched; the SQL `load_extension()` function
/// stays disabled.
pub fn set_extension_loading(conn: &Connection, enabled: bool) -> rusqlite::Result<()> {
    let rc = unsafe {
        ffi::sqlite3_db_config(
            conn.handle(),
            ffi::SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION as c_int,
            c_int::from(enabled),
            std::ptr::null_mut::<c_int>(),
        )
    };
    check(rc)
}

fn check(rc: c_int) -> rusqlite::Result<()> {
    if rc == ffi::SQLITE_OK {
        Ok(())
    } else {
        Err(rusqlite::Error::SqliteFailure(ffi::Error::new(rc), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_denies_load() {
        let conn = Connection::open_in_memory().unwrap();
        set_extension_loading(&conn, false).unwrap();
        assert!(!extension_loading_enabled(&conn).unwrap());
        assert!(matches!(
            ConnectionLoadGate::new(&conn).check(),
            Err(RegistryError::LoadDenied)
        ));
    }

    #[test]
    fn test_toggle() {
        let conn = Connection::open_in_memory().unwrap();

        set_extension_loading(&conn, true).unwrap();
        assert!(extension_loading_enabled(&conn).unwrap());
        assert!(ConnectionLoadGate::new(&conn).check().is_ok());

        set_extension_loading(&conn, false).unwrap();
        assert!(!extension_loading_enabled(&conn).unwrap());
    }
}
