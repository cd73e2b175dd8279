//! Integration tests for the command-line session.
//!
//! Opens a session the way `main` does, loads fixture bundles from a
//! temporary directory and checks formatted query output.

use std::path::PathBuf;

use protosql::cli::{OutputFormat, OutputFormatter, QueryResult, Session};
use protosql_core::testing::{address_book_bundle, encode, enum_bundle, pool_from_bundle, sample_person};
use protosql_core::Config;
use rusqlite::types::Value;
use tempfile::TempDir;

fn write_bundle(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn render(result: &QueryResult, format: OutputFormat) -> String {
    let mut output = Vec::new();
    OutputFormatter::new(format).write(result, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_session_loads_bundles_and_lists_types() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(None, Config::default()).unwrap();

    session
        .load_bundle(&write_bundle(&dir, "addressbook.pb", &address_book_bundle()))
        .unwrap();
    session
        .load_bundle(&write_bundle(&dir, "enums.pb", &enum_bundle()))
        .unwrap();

    let registry = session.registry();
    assert_eq!(
        registry.message_names(),
        vec!["Person", "Person.PhoneNumber", "TestMessage"]
    );
    assert_eq!(
        registry.enum_names(),
        vec![
            "Person.PhoneType",
            "TestEnum",
            "TestEnumWithAliases",
            "TestMessage.EmbeddedTestEnum"
        ]
    );
}

#[test]
fn test_session_resolves_bundles_on_search_path() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(&dir, "enums.pb", &enum_bundle());

    let config = Config {
        bundle_path: vec![dir.path().to_path_buf()],
        ..Config::default()
    };
    let session = Session::open(None, config).unwrap();
    session.load_bundle(&PathBuf::from("enums.pb")).unwrap();

    assert!(session.registry().resolve_enum("TestEnum").is_ok());
}

#[test]
fn test_session_missing_bundle() {
    let session = Session::open(None, Config::default()).unwrap();
    let err = session
        .load_bundle(&PathBuf::from("/nonexistent/protosql/missing.pb"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("Could not load library"), "{err:#}");
}

#[test]
fn test_run_multiple_statements() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(None, Config::default()).unwrap();
    session
        .load_bundle(&write_bundle(&dir, "addressbook.pb", &address_book_bundle()))
        .unwrap();

    let person = encode(&sample_person(&pool_from_bundle(&address_book_bundle())));
    session
        .connection()
        .execute("CREATE TABLE people(data BLOB)", [])
        .unwrap();
    session
        .connection()
        .execute("INSERT INTO people(data) VALUES (?1)", [person])
        .unwrap();

    let results = session
        .run(
            "UPDATE people SET data = data;
             SELECT protobuf_extract(data, 'Person', '$.name') AS name,
                    protobuf_extract(data, 'Person', '$.phones[-1].type.name') AS phone_type,
                    protobuf_extract(data, 'Person', '$.manager') AS manager
             FROM people;
             SELECT number, name FROM protobuf_enum('Person.PhoneType') WHERE number = 2;",
        )
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].columns, vec!["name", "phone_type", "manager"]);
    assert_eq!(
        results[0].rows,
        vec![vec![
            Value::Text("John Smith".into()),
            Value::Text("WORK".into()),
            Value::Null,
        ]]
    );
    assert_eq!(
        results[1].rows,
        vec![vec![Value::Integer(2), Value::Text("WORK".into())]]
    );

    let csv = render(&results[1], OutputFormat::Csv);
    assert_eq!(csv, "number,name\n2,WORK\n");
}

#[test]
fn test_message_results_render_as_hex() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(None, Config::default()).unwrap();
    session
        .load_bundle(&write_bundle(&dir, "addressbook.pb", &address_book_bundle()))
        .unwrap();

    // Person { id: 1 }
    let results = session
        .run("SELECT protobuf_extract(x'1001', 'Person', '$') AS person")
        .unwrap();
    let json = render(&results[0], OutputFormat::Json);
    assert_eq!(json.trim(), r#"{"person":"1001"}"#);
}

#[test]
fn test_run_reports_sql_errors() {
    let session = Session::open(None, Config::default()).unwrap();
    let err = session
        .run("SELECT protobuf_extract(x'', 'Person', '#')")
        .unwrap_err();
    assert!(format!("{err:#}").contains("Invalid path"), "{err:#}");
}
