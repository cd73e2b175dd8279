//! `protobuf_extract(data, type, path)` -> INTEGER | REAL | TEXT | BLOB | NULL

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use protosql_core::{parse_path, DescriptorRegistry, Extracted, Extractor, Path};
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::{Value, ValueRef};
use rusqlite::Connection;

use crate::error::ExtensionError;

const NAME: &str = "protobuf_extract";

pub fn register(conn: &Connection, registry: Arc<DescriptorRegistry>) -> rusqlite::Result<()> {
    let registry = AssertUnwindSafe(registry);

    conn.create_scalar_function(
        NAME,
        3,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        move |ctx| {
            if matches!(ctx.get_raw(2), ValueRef::Null) {
                return Ok(Value::Null);
            }

            // Compiled once per statement when the path argument is constant.
            // A malformed path is reported even when data or type is NULL.
            let path = ctx.get_or_create_aux(2, compile_path)?;
            if (0..2).any(|i| matches!(ctx.get_raw(i), ValueRef::Null)) {
                return Ok(Value::Null);
            }
            let root_type: String = ctx.get(1)?;
            let data = message_bytes(ctx)?;

            let extracted = Extractor::new(&registry)
                .extract(data, &root_type, &path)
                .map_err(ExtensionError::from)?;

            Ok(to_sql_value(extracted))
        },
    )
}

fn compile_path(value: ValueRef<'_>) -> Result<Path, ExtensionError> {
    let text = value
        .as_str()
        .map_err(|_| ExtensionError::invalid_argument(NAME, "path must be TEXT"))?;
    Ok(parse_path(text)?)
}

fn message_bytes<'a>(ctx: &'a Context<'_>) -> Result<&'a [u8], ExtensionError> {
    match ctx.get_raw(0) {
        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Ok(bytes),
        other => Err(ExtensionError::invalid_argument(
            NAME,
            format!("data must be a BLOB, got {}", other.data_type()),
        )),
    }
}

fn to_sql_value(extracted: Extracted) -> Value {
    match extracted {
        Extracted::Null => Value::Null,
        Extracted::Integer(i) => Value::Integer(i),
        Extracted::Real(f) => Value::Real(f),
        Extracted::Text(s) => Value::Text(s),
        Extracted::Blob(b) => Value::Blob(b),
    }
}
