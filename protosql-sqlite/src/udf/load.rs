//! `protobuf_load(path)` -> NULL

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use protosql_core::DescriptorRegistry;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Null;
use rusqlite::Connection;
use tracing::debug;

use crate::error::ExtensionError;
use crate::gate::ConnectionLoadGate;

pub fn register(conn: &Connection, registry: Arc<DescriptorRegistry>) -> rusqlite::Result<()> {
    let registry = AssertUnwindSafe(registry);

    // Not callable from triggers or views
    conn.create_scalar_function(
        "protobuf_load",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DIRECTONLY,
        move |ctx| {
            let path: String = ctx.get(0)?;

            let caller = unsafe { ctx.get_connection()? };
            let gate = ConnectionLoadGate::new(&caller);

            let report = registry
                .load_file(&path, &gate)
                .map_err(ExtensionError::from)?;
            debug!(
                path = %path,
                added = report.added.len(),
                already_present = report.already_present,
                "protobuf_load"
            );

            Ok(Null)
        },
    )
}
