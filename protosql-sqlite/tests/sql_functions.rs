//! Integration tests for the SQL surface.
//!
//! Each test opens an in-memory connection with its own registry, writes
//! fixture bundles to a temporary directory and loads them through
//! `protobuf_load`.

use std::path::Path;
use std::sync::Arc;

use protosql_core::testing::{
    address_book_bundle, conflicting_person_bundle, encode, enum_bundle, hundred_element_m,
    pool_from_bundle, repeated_bundle, sample_person,
};
use protosql_core::DescriptorRegistry;
use protosql_sqlite::{register, set_extension_loading};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tempfile::TempDir;

struct Fixture {
    conn: Connection,
    registry: Arc<DescriptorRegistry>,
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        let registry = Arc::new(DescriptorRegistry::new());
        register(&conn, Arc::clone(&registry)).unwrap();
        Self {
            conn,
            registry,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A fixture with loading enabled and the given bundles loaded.
    fn with_bundles(bundles: &[(&str, Vec<u8>)]) -> Self {
        let fixture = Self::new();
        set_extension_loading(&fixture.conn, true).unwrap();
        for (name, bytes) in bundles {
            let path = fixture.write_bundle(name, bytes);
            fixture.load(&path).unwrap();
        }
        fixture
    }

    fn write_bundle(&self, name: &str, bytes: &[u8]) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path_str(&path)
    }

    fn load(&self, path: &str) -> rusqlite::Result<Value> {
        self.conn
            .query_row("SELECT protobuf_load(?1)", [path], |row| row.get(0))
    }

    fn extract(&self, data: &[u8], ty: &str, path: &str) -> rusqlite::Result<Value> {
        self.conn.query_row(
            "SELECT protobuf_extract(?1, ?2, ?3)",
            params![data, ty, path],
            |row| row.get(0),
        )
    }

    fn enum_rows(&self, sql: &str) -> rusqlite::Result<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect()
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn person_bytes() -> Vec<u8> {
    encode(&sample_person(&pool_from_bundle(&address_book_bundle())))
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

// =============================================================================
// protobuf_load
// =============================================================================

#[test]
fn test_load_requires_extension_loading() {
    let fixture = Fixture::new();
    set_extension_loading(&fixture.conn, false).unwrap();
    let path = fixture.write_bundle("addressbook.pb", &address_book_bundle());

    let err = fixture.load(&path).unwrap_err();
    assert!(err.to_string().contains("Extension loading"), "{err}");
    assert!(fixture.registry.is_empty());

    set_extension_loading(&fixture.conn, true).unwrap();
    assert_eq!(fixture.load(&path).unwrap(), Value::Null);
    assert!(fixture.registry.resolve_message("Person").is_ok());
}

#[test]
fn test_load_missing_file() {
    let fixture = Fixture::with_bundles(&[]);
    let err = fixture.load("/nonexistent/protosql/bundle.pb").unwrap_err();
    assert!(
        err.to_string()
            .starts_with("Could not load library '/nonexistent/protosql/bundle.pb'"),
        "{err}"
    );
}

#[test]
fn test_reload_is_idempotent() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let path = fixture.write_bundle("again.pb", &address_book_bundle());
    let before = fixture.registry.len();

    assert_eq!(fixture.load(&path).unwrap(), Value::Null);
    assert_eq!(fixture.registry.len(), before);
}

#[test]
fn test_load_conflicting_schema() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let path = fixture.write_bundle("other.pb", &conflicting_person_bundle());

    let err = fixture.load(&path).unwrap_err();
    assert!(
        err.to_string().contains(
            "Schema conflict: type 'Person' is already loaded with a different definition"
        ),
        "{err}"
    );
}

// =============================================================================
// protobuf_extract
// =============================================================================

#[test]
fn test_extract_root_round_trip() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let bytes = person_bytes();

    assert_eq!(
        fixture.extract(&bytes, "Person", "$").unwrap(),
        Value::Blob(bytes.clone())
    );
}

#[test]
fn test_extract_values() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let bytes = person_bytes();
    let get = |path| fixture.extract(&bytes, "Person", path).unwrap();

    assert_eq!(get("$.name"), text("John Smith"));
    assert_eq!(get("$.id"), Value::Integer(42));
    assert_eq!(get("$.active"), Value::Integer(1));
    assert_eq!(get("$.salary"), Value::Real(0.0));
    assert_eq!(get("$.phones[0].number"), text("555-0100"));
    assert_eq!(get("$.phones[-1].type"), Value::Integer(2));
    assert_eq!(get("$.phones[-1].type.name"), text("WORK"));
    assert_eq!(get("$.phones[-1].type.number"), Value::Integer(2));
    assert_eq!(get("$.manager.name"), Value::Null);
}

#[test]
fn test_extract_repeated_indexing() {
    let fixture = Fixture::with_bundles(&[("repeated.pb", repeated_bundle())]);
    let bytes = encode(&hundred_element_m(&pool_from_bundle(&repeated_bundle())));

    assert_eq!(fixture.extract(&bytes, "M", "$.x[20]").unwrap(), Value::Integer(30));
    assert_eq!(fixture.extract(&bytes, "M", "$.x[-3]").unwrap(), Value::Integer(107));

    let err = fixture.extract(&bytes, "M", "$.x[100]").unwrap_err();
    assert!(
        err.to_string()
            .contains("Index 100 out of range for repeated field 'x' of length 100"),
        "{err}"
    );
}

#[test]
fn test_extract_invalid_path() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);

    for ty in ["Person", "NoSuchType"] {
        let err = fixture.extract(&[], ty, "#").unwrap_err();
        assert!(err.to_string().contains("Invalid path"), "{err}");
    }
}

#[test]
fn test_extract_errors() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let bytes = person_bytes();

    let err = fixture.extract(&bytes, "Nope", "$").unwrap_err();
    assert!(
        err.to_string().contains("Could not find message descriptor 'Nope'"),
        "{err}"
    );

    let err = fixture.extract(&bytes, "Person", "$.nope").unwrap_err();
    assert!(
        err.to_string().contains("Invalid field name 'nope' for message 'Person'"),
        "{err}"
    );

    let err = fixture.extract(&bytes, "Person", "$.name.first").unwrap_err();
    assert!(
        err.to_string().contains("Invalid path: cannot traverse past a scalar value"),
        "{err}"
    );

    let err = fixture.extract(b"\xff\xff\xff", "Person", "$.id").unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse message 'Person'"),
        "{err}"
    );
}

#[test]
fn test_extract_null_arguments() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);

    for sql in [
        "SELECT protobuf_extract(NULL, 'Person', '$')",
        "SELECT protobuf_extract(x'', NULL, '$')",
        "SELECT protobuf_extract(x'', 'Person', NULL)",
    ] {
        let value: Value = fixture.conn.query_row(sql, [], |row| row.get(0)).unwrap();
        assert_eq!(value, Value::Null, "{sql}");
    }
}

#[test]
fn test_extract_null_arguments_still_check_path() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);

    for sql in [
        "SELECT protobuf_extract(NULL, 'Person', '#')",
        "SELECT protobuf_extract(x'', NULL, '#')",
        "SELECT protobuf_extract(NULL, NULL, '#')",
    ] {
        let err = fixture
            .conn
            .query_row(sql, [], |row| row.get::<_, Value>(0))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid path"), "{sql}: {err}");
    }
}

#[test]
fn test_extract_rejects_non_blob_data() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let err = fixture
        .conn
        .query_row("SELECT protobuf_extract(42, 'Person', '$')", [], |row| {
            row.get::<_, Value>(0)
        })
        .unwrap_err();
    assert!(err.to_string().contains("data must be a BLOB"), "{err}");
}

#[test]
fn test_extract_over_table() {
    let fixture = Fixture::with_bundles(&[("addressbook.pb", address_book_bundle())]);
    let pool = pool_from_bundle(&address_book_bundle());

    fixture
        .conn
        .execute("CREATE TABLE people(data BLOB)", [])
        .unwrap();
    for id in [1, 2, 3] {
        let mut person = sample_person(&pool);
        person.set_field_by_name("id", prost_reflect::Value::I32(id));
        fixture
            .conn
            .execute("INSERT INTO people(data) VALUES (?1)", [encode(&person)])
            .unwrap();
    }

    let mut stmt = fixture
        .conn
        .prepare("SELECT protobuf_extract(data, 'Person', '$.id') FROM people ORDER BY rowid")
        .unwrap();
    let ids: Vec<i64> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

// =============================================================================
// protobuf_enum
// =============================================================================

#[test]
fn test_enum_declaration_order() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let rows = fixture
        .enum_rows("SELECT number, name FROM protobuf_enum('TestEnum')")
        .unwrap();
    assert_eq!(
        rows,
        vec![(3, "A".into()), (2, "B".into()), (1, "C".into())]
    );
}

#[test]
fn test_enum_by_name() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let rows = fixture
        .enum_rows("SELECT number, name FROM protobuf_enum('TestEnum') WHERE name = 'B'")
        .unwrap();
    assert_eq!(rows, vec![(2, "B".into())]);
}

#[test]
fn test_enum_by_number_with_aliases() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let rows = fixture
        .enum_rows("SELECT number, name FROM protobuf_enum('TestEnumWithAliases') WHERE number = 1")
        .unwrap();
    assert_eq!(rows, vec![(1, "A1".into()), (1, "A2".into())]);
}

#[test]
fn test_enum_number_and_name() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let rows = fixture
        .enum_rows(
            "SELECT number, name FROM protobuf_enum('TestEnumWithAliases') \
             WHERE number = 1 AND name = 'A2'",
        )
        .unwrap();
    assert_eq!(rows, vec![(1, "A2".into())]);
}

#[test]
fn test_enum_nested() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let rows = fixture
        .enum_rows("SELECT number, name FROM protobuf_enum('TestMessage.EmbeddedTestEnum')")
        .unwrap();
    assert_eq!(
        rows,
        vec![(1, "D".into()), (2, "E".into()), (3, "F".into())]
    );
}

#[test]
fn test_enum_unknown_type() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let err = fixture
        .enum_rows("SELECT number, name FROM protobuf_enum('NoSuchEnum')")
        .unwrap_err();
    assert!(
        err.to_string().contains("Could not find enum type 'NoSuchEnum'"),
        "{err}"
    );
}

#[test]
fn test_enum_requires_argument() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    assert!(fixture
        .enum_rows("SELECT number, name FROM protobuf_enum")
        .is_err());
}

#[test]
fn test_enum_hidden_column() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let name: String = fixture
        .conn
        .query_row(
            "SELECT enum FROM protobuf_enum('TestEnum') LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "TestEnum");
}

#[test]
fn test_enum_name_lookup_plan() {
    let fixture = Fixture::with_bundles(&[("enums.pb", enum_bundle())]);
    let sql = "SELECT number FROM protobuf_enum('TestEnum') WHERE name = 'B'";

    let detail: String = fixture
        .conn
        .query_row(&format!("EXPLAIN QUERY PLAN {sql}"), [], |row| row.get(3))
        .unwrap();
    assert!(detail.contains("INDEX 2"), "{detail}");

    let number: i64 = fixture.conn.query_row(sql, [], |row| row.get(0)).unwrap();
    assert_eq!(number, 2);
}
